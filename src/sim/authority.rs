use ahash::AHashMap;
use log::info;

/// Which peer may author a body's physics this tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Authority {
    #[default]
    Authoritative,
    Remote,
}

impl Authority {
    #[must_use]
    pub const fn is_authoritative(self) -> bool {
        matches!(self, Self::Authoritative)
    }

    /// How the host should simulate the body under this authority
    #[must_use]
    pub const fn body_mode(self) -> BodyMode {
        match self {
            Self::Authoritative => BodyMode::Dynamic,
            Self::Remote => BodyMode::Kinematic,
        }
    }
}

/// Whether the host physics simulates the body or treats it as immovable
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BodyMode {
    #[default]
    Dynamic,
    Kinematic,
}

impl TryFrom<u8> for Authority {
    type Error = ();
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Authoritative),
            1 => Ok(Self::Remote),
            _ => Err(()),
        }
    }
}

pub type ViewId = u32;
pub type ActorId = u32;

/// Tracks which network actor owns each networked body.
///
/// Fed by the external networking library's ownership callbacks.
/// Bodies nobody has claimed yet are owned by the master client.
pub struct OwnershipRegistry {
    local_actor: ActorId,
    is_master_client: bool,
    owners: AHashMap<ViewId, ActorId>,
}

impl OwnershipRegistry {
    #[must_use]
    pub fn new(local_actor: ActorId, is_master_client: bool) -> Self {
        Self {
            local_actor,
            is_master_client,
            owners: AHashMap::new(),
        }
    }

    #[must_use]
    pub const fn local_actor(&self) -> ActorId {
        self.local_actor
    }

    /// Starts tracking `view`, without an explicit owner
    pub fn register(&mut self, view: ViewId) {
        self.owners.remove(&view);
    }

    /// Ownership of `view` moved to `new_owner`
    ///
    /// Returns the new authority of the local peer over `view`.
    pub fn on_ownership_changed(&mut self, view: ViewId, new_owner: ActorId) -> Authority {
        let previous = self.authority_of(view);
        self.owners.insert(view, new_owner);
        let authority = self.authority_of(view);

        if previous != authority {
            info!("View {view} is now owned by actor {new_owner}, local authority: {authority:?}");
        }

        authority
    }

    /// The local peer joined a room
    ///
    /// Non-master clients drop every unclaimed body to kinematic.
    pub fn on_joined_room(&mut self, local_actor: ActorId, is_master_client: bool) {
        self.local_actor = local_actor;
        self.is_master_client = is_master_client;

        if !is_master_client {
            info!("Joined as client {local_actor}, unclaimed bodies become kinematic");
        }
    }

    #[must_use]
    pub fn authority_of(&self, view: ViewId) -> Authority {
        let is_mine = match self.owners.get(&view) {
            Some(&owner) => owner == self.local_actor,
            None => self.is_master_client,
        };

        if is_mine {
            Authority::Authoritative
        } else {
            Authority::Remote
        }
    }
}
