/// The two editor screens. Switching between them is unguarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    General,
    Fields,
}

impl Screen {
    pub const ALL: [Screen; 2] = [Screen::General, Screen::Fields];

    pub fn title(self) -> &'static str {
        match self {
            Screen::General => "General",
            Screen::Fields => "Fields",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Screen::General => 0,
            Screen::Fields => 1,
        }
    }

    pub fn step(self, delta: i32) -> Screen {
        let len = Self::ALL.len() as i32;
        let next = (self.index() as i32 + delta).rem_euclid(len);
        Self::ALL[next as usize]
    }
}
