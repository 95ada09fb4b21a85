use serde::{Deserialize, Serialize};

/// Bitflag permissions relevant to watchlist auto-requesting. Values share
/// the host application's permission bit layout, so a `PermissionSet` can be
/// built straight from the stored integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Permission {
    Admin = 1 << 1,
    Request = 1 << 5,
    AutoApproveTv = 1 << 12,
    AutoRequest = 1 << 13,
    AutoRequestMovie = 1 << 14,
    AutoRequestTv = 1 << 15,
}

/// A user's granted permission bits.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissionSet(pub u32);

impl PermissionSet {
    pub fn new(bits: u32) -> Self {
        Self(bits)
    }

    /// Admin implies every other permission.
    pub fn contains(&self, permission: Permission) -> bool {
        let bits = permission as u32;
        self.0 & Permission::Admin as u32 != 0 || self.0 & bits == bits
    }

    /// True when at least one of `required` is granted. Pure over the bit
    /// set; callers pass whatever slice the gate needs.
    pub fn has_any(&self, required: &[Permission]) -> bool {
        required.iter().any(|p| self.contains(*p))
    }
}

impl From<u32> for PermissionSet {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl std::ops::BitOr<Permission> for Permission {
    type Output = PermissionSet;

    fn bitor(self, rhs: Permission) -> PermissionSet {
        PermissionSet(self as u32 | rhs as u32)
    }
}

impl std::ops::BitOr<Permission> for PermissionSet {
    type Output = PermissionSet;

    fn bitor(self, rhs: Permission) -> PermissionSet {
        PermissionSet(self.0 | rhs as u32)
    }
}

impl From<Permission> for PermissionSet {
    fn from(permission: Permission) -> Self {
        Self(permission as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_any_single_grant() {
        let set = PermissionSet::from(Permission::AutoRequestMovie);
        assert!(set.has_any(&[Permission::AutoRequest, Permission::AutoRequestMovie]));
        assert!(!set.has_any(&[Permission::AutoRequestTv]));
    }

    #[test]
    fn test_has_any_empty_set() {
        let set = PermissionSet::default();
        assert!(!set.has_any(&[
            Permission::AutoRequest,
            Permission::AutoRequestMovie,
            Permission::AutoApproveTv,
        ]));
    }

    #[test]
    fn test_admin_implies_everything() {
        let set = PermissionSet::from(Permission::Admin);
        assert!(set.contains(Permission::AutoRequest));
        assert!(set.has_any(&[Permission::AutoRequestTv]));
    }

    #[test]
    fn test_bitor_combines_grants() {
        let set = Permission::AutoRequest | Permission::AutoApproveTv;
        assert!(set.contains(Permission::AutoRequest));
        assert!(set.contains(Permission::AutoApproveTv));
        assert!(!set.contains(Permission::AutoRequestMovie));
    }
}
