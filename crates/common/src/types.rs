use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four riders on the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animal {
    Cow,
    Hippo,
    Lion,
    Skeleton,
}

impl Animal {
    /// All riders, in draw order.
    pub const ALL: [Animal; 4] = [Animal::Cow, Animal::Hippo, Animal::Lion, Animal::Skeleton];

    pub fn name(self) -> &'static str {
        match self {
            Animal::Cow => "cow",
            Animal::Hippo => "hippo",
            Animal::Lion => "lion",
            Animal::Skeleton => "skeleton",
        }
    }

    /// Position in [`Animal::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies a drawable mesh. Renderers key their GPU resources by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshId {
    Roof,
    Ground,
    Poles,
    Animal(Animal),
}

impl MeshId {
    /// Every mesh the scene draws, in draw order.
    pub const ALL: [MeshId; 7] = [
        MeshId::Roof,
        MeshId::Ground,
        MeshId::Poles,
        MeshId::Animal(Animal::Cow),
        MeshId::Animal(Animal::Hippo),
        MeshId::Animal(Animal::Lion),
        MeshId::Animal(Animal::Skeleton),
    ];
}

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshId::Roof => f.write_str("roof"),
            MeshId::Ground => f.write_str("ground"),
            MeshId::Poles => f.write_str("poles"),
            MeshId::Animal(a) => write!(f, "{a}"),
        }
    }
}
