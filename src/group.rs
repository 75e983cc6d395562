use std::{
    fmt,
    sync::{Mutex, PoisonError},
};

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Experimental condition. Decides which module a participant reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Control,
    Treatment,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Control => f.write_str("control"),
            Group::Treatment => f.write_str("treatment"),
        }
    }
}

/// Source of group draws. Called once per session.
pub trait AssignGroup: Send + Sync + 'static {
    fn draw(&self) -> Group;
}

/// Fair coin over [`Group`], shared by every chat.
pub struct RandomAssigner {
    rng: Mutex<StdRng>,
}

impl RandomAssigner {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl AssignGroup for RandomAssigner {
    fn draw(&self) -> Group {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        if rng.gen_bool(0.5) {
            Group::Treatment
        } else {
            Group::Control
        }
    }
}

/// Always hands out the same group.
pub struct FixedAssigner(pub Group);

impl AssignGroup for FixedAssigner {
    fn draw(&self) -> Group {
        self.0
    }
}
