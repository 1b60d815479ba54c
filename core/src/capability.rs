use std::fmt;

/// One operation a sorted container may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Add,
    Remove,
    Discard,
    Update,
    Contains,
    GetItem,
    DelItem,
    Index,
    Count,
    Bisect,
    Slice,
    Iter,
    Pop,
}

impl Capability {
    pub const ALL: [Capability; 13] = [
        Capability::Add,
        Capability::Remove,
        Capability::Discard,
        Capability::Update,
        Capability::Contains,
        Capability::GetItem,
        Capability::DelItem,
        Capability::Index,
        Capability::Count,
        Capability::Bisect,
        Capability::Slice,
        Capability::Iter,
        Capability::Pop,
    ];

    #[inline]
    const fn bit(self) -> u16 {
        1 << (self as u16)
    }

    pub fn name(self) -> &'static str {
        match self {
            Capability::Add => "add",
            Capability::Remove => "remove",
            Capability::Discard => "discard",
            Capability::Update => "update",
            Capability::Contains => "contains",
            Capability::GetItem => "getitem",
            Capability::DelItem => "delitem",
            Capability::Index => "index",
            Capability::Count => "count",
            Capability::Bisect => "bisect",
            Capability::Slice => "slice",
            Capability::Iter => "iter",
            Capability::Pop => "pop",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared capability set of a candidate, or the requirement set of a scenario.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities(u16);

impl Capabilities {
    pub const NONE: Capabilities = Capabilities(0);
    pub const ALL: Capabilities = Capabilities::of(&Capability::ALL);

    /// Everything except positional access (get/delete by position, index-of, slice).
    pub const NON_POSITIONAL: Capabilities = Capabilities::ALL.without(Capabilities::of(&[
        Capability::GetItem,
        Capability::DelItem,
        Capability::Index,
        Capability::Slice,
    ]));

    pub const fn of(caps: &[Capability]) -> Capabilities {
        let mut bits = 0u16;
        let mut i = 0;
        while i < caps.len() {
            bits |= caps[i].bit();
            i += 1;
        }
        Capabilities(bits)
    }

    #[inline]
    pub const fn contains(self, other: Capabilities) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn has(self, cap: Capability) -> bool {
        (self.0 & cap.bit()) != 0
    }

    #[inline]
    pub const fn union(self, other: Capabilities) -> Capabilities {
        Capabilities(self.0 | other.0)
    }

    #[inline]
    pub const fn without(self, other: Capabilities) -> Capabilities {
        Capabilities(self.0 & !other.0)
    }

    #[inline]
    pub fn insert(&mut self, cap: Capability) {
        self.0 |= cap.bit();
    }

    /// Capabilities in `required` that this set lacks, in declaration order.
    pub fn missing(self, required: Capabilities) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|cap| required.has(*cap) && !self.has(*cap))
            .collect()
    }

    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::ALL.into_iter().filter(move |cap| self.has(*cap))
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Capability::name)).finish()
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Capability::name).collect();
        write!(f, "{}", names.join(","))
    }
}
