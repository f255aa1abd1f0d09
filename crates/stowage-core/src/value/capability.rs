use crate::{
    ty::Type,
    types::Address,
    value::{AddressPath, Path},
};

///
/// Capability
///
/// Two eras: path-addressed (legacy) and controller-ID addressed.
/// Migration only ever converts `Path` into `Id`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Capability {
    Path(PathCapability),
    Id(IdCapability),
}

impl Capability {
    #[must_use]
    pub const fn address(&self) -> Address {
        match self {
            Self::Path(cap) => cap.address,
            Self::Id(cap) => cap.address,
        }
    }

    #[must_use]
    pub const fn borrow_type(&self) -> Option<&Type> {
        match self {
            Self::Path(cap) => cap.borrow_type.as_ref(),
            Self::Id(cap) => Some(&cap.borrow_type),
        }
    }

    #[must_use]
    pub const fn is_legacy(&self) -> bool {
        matches!(self, Self::Path(_))
    }
}

///
/// PathCapability
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathCapability {
    pub address: Address,
    pub path: Path,
    pub borrow_type: Option<Type>,
}

impl PathCapability {
    #[must_use]
    pub const fn new(address: Address, path: Path, borrow_type: Option<Type>) -> Self {
        Self {
            address,
            path,
            borrow_type,
        }
    }

    /// The `(address, path)` key the capability targets.
    #[must_use]
    pub fn address_path(&self) -> AddressPath {
        AddressPath::new(self.address, self.path.clone())
    }
}

///
/// IdCapability
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdCapability {
    pub id: u64,
    pub address: Address,
    pub borrow_type: Type,
}

impl IdCapability {
    #[must_use]
    pub const fn new(id: u64, address: Address, borrow_type: Type) -> Self {
        Self {
            id,
            address,
            borrow_type,
        }
    }
}
