use moneta_common::CallerRoles;

/// Access-control rank gating a command, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AccessTier {
    All,
    Subs,
    Vip,
    Mods,
    Broadcaster,
}

impl AccessTier {
    /// Every tier in ascending order.
    pub const ALL: [Self; 5] = [
        Self::All,
        Self::Subs,
        Self::Vip,
        Self::Mods,
        Self::Broadcaster,
    ];

    fn grants(self, roles: &CallerRoles) -> bool {
        match self {
            Self::All => true,
            Self::Subs => roles.subscriber,
            Self::Vip => roles.vip,
            Self::Mods => roles.moderator,
            Self::Broadcaster => roles.broadcaster,
        }
    }
}

/// Whether the caller's roles satisfy `required`.
///
/// Scans from `required` upward through `Broadcaster` and succeeds at the
/// first tier whose role flag the caller holds. The upward scan is the
/// point: a moderator passes a Subs-gated command without holding the
/// subscriber badge. `All` passes everyone immediately.
#[must_use]
pub fn satisfies(required: AccessTier, roles: &CallerRoles) -> bool {
    AccessTier::ALL
        .iter()
        .filter(|tier| **tier >= required)
        .any(|tier| tier.grants(roles))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn all_tier_passes_everyone() {
        assert!(satisfies(AccessTier::All, &CallerRoles::viewer()));
        assert!(satisfies(AccessTier::All, &CallerRoles::broadcaster()));
    }

    #[test]
    fn viewer_fails_every_gated_tier() {
        let viewer = CallerRoles::viewer();
        for tier in [
            AccessTier::Subs,
            AccessTier::Vip,
            AccessTier::Mods,
            AccessTier::Broadcaster,
        ] {
            assert!(!satisfies(tier, &viewer), "{tier:?}");
        }
    }

    #[test]
    fn broadcaster_passes_every_tier() {
        let caster = CallerRoles::broadcaster();
        for tier in AccessTier::ALL {
            assert!(satisfies(tier, &caster), "{tier:?}");
        }
    }

    #[test]
    fn higher_role_passes_lower_requirement() {
        // The scan runs upward from the required tier, so a VIP passes a
        // Subs-gated command and a moderator passes a VIP-gated one.
        assert!(satisfies(AccessTier::Subs, &CallerRoles::vip()));
        assert!(satisfies(AccessTier::Subs, &CallerRoles::moderator()));
        assert!(satisfies(AccessTier::Vip, &CallerRoles::moderator()));
    }

    #[test]
    fn lower_role_fails_higher_requirement() {
        assert!(!satisfies(AccessTier::Vip, &CallerRoles::subscriber()));
        assert!(!satisfies(AccessTier::Mods, &CallerRoles::vip()));
        assert!(!satisfies(AccessTier::Broadcaster, &CallerRoles::moderator()));
    }

    #[test]
    fn satisfies_iff_some_flag_at_or_above_required() {
        let cases = [
            (CallerRoles::subscriber(), AccessTier::Subs),
            (CallerRoles::vip(), AccessTier::Vip),
            (CallerRoles::moderator(), AccessTier::Mods),
            (CallerRoles::broadcaster(), AccessTier::Broadcaster),
        ];
        for required in AccessTier::ALL {
            for (roles, held) in &cases {
                assert_eq!(
                    satisfies(required, roles),
                    *held >= required,
                    "required {required:?}, held {held:?}"
                );
            }
        }
    }
}
