use super::path::{FieldPath, FieldValue, PathFilter};

/// What happened to the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Change<'a> {
    Written {
        path: &'a FieldPath,
        value: &'a FieldValue,
    },
    Reloaded,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&Change<'_>)>;

struct Subscriber {
    id: SubscriptionId,
    filter: PathFilter,
    callback: Callback,
}

/// Synchronous fan-out of document changes.
///
/// Whole-document changes (reload, reset) reach every subscriber; writes only
/// reach those whose filter matches the written path.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

impl Observers {
    pub fn subscribe(
        &mut self,
        filter: PathFilter,
        callback: impl FnMut(&Change<'_>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            filter,
            callback: Box::new(callback),
        });
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|subscriber| subscriber.id != id);
        self.subscribers.len() != before
    }

    pub fn notify(&mut self, change: &Change<'_>) {
        for subscriber in &mut self.subscribers {
            let wanted = match change {
                Change::Written { path, .. } => subscriber.filter.matches(path),
                Change::Reloaded | Change::Reset => true,
            };
            if wanted {
                (subscriber.callback)(change);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
