use crate::error::{AppError, AppResult};

/// A user's standing in one circle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Membership {
    pub is_member: bool,
    pub is_banned: bool,
}

impl Membership {
    pub fn check_join(&self) -> AppResult<()> {
        if self.is_banned {
            return Err(AppError::Forbidden(
                "You have been banned from this circle.".into(),
            ));
        }
        if self.is_member {
            return Err(AppError::Conflict("Already a member".into()));
        }
        Ok(())
    }

    pub fn check_leave(&self) -> AppResult<()> {
        if !self.is_member {
            return Err(AppError::Conflict("Not a member".into()));
        }
        Ok(())
    }

    pub fn check_post(&self) -> AppResult<()> {
        if self.is_banned {
            return Err(AppError::Forbidden(
                "You have been banned from this circle.".into(),
            ));
        }
        Ok(())
    }

    /// Writes a moderator ban still needs. Empty once the user is banned and out.
    pub fn ban_writes(&self) -> BanWrites {
        BanWrites {
            remove_membership: self.is_member,
            record_ban: !self.is_banned,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BanWrites {
    pub remove_membership: bool,
    pub record_ban: bool,
}

impl BanWrites {
    pub fn is_empty(&self) -> bool {
        !self.remove_membership && !self.record_ban
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_user_can_join_and_post() {
        let m = Membership::default();
        assert!(m.check_join().is_ok());
        assert!(m.check_post().is_ok());
        assert!(matches!(m.check_leave(), Err(AppError::Conflict(_))));
    }

    #[test]
    fn test_member_cannot_join_twice() {
        let m = Membership {
            is_member: true,
            is_banned: false,
        };
        assert!(matches!(m.check_join(), Err(AppError::Conflict(_))));
        assert!(m.check_leave().is_ok());
    }

    #[test]
    fn test_banning_a_member_removes_and_records() {
        let m = Membership {
            is_member: true,
            is_banned: false,
        };
        assert_eq!(
            m.ban_writes(),
            BanWrites {
                remove_membership: true,
                record_ban: true,
            }
        );
    }

    #[test]
    fn test_banning_a_non_member_only_records() {
        let writes = Membership::default().ban_writes();
        assert!(!writes.remove_membership);
        assert!(writes.record_ban);
    }

    #[test]
    fn test_repeat_ban_needs_no_writes() {
        let m = Membership {
            is_member: false,
            is_banned: true,
        };
        assert!(m.ban_writes().is_empty());
        assert!(matches!(m.check_join(), Err(AppError::Forbidden(_))));
        assert!(matches!(m.check_post(), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_banned_user_still_listed_is_removed() {
        let m = Membership {
            is_member: true,
            is_banned: true,
        };
        let writes = m.ban_writes();
        assert!(writes.remove_membership);
        assert!(!writes.record_ban);
    }
}
