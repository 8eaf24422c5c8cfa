/// Achievement tiers, ordered by XP threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeKind {
    LegacyStarter,
    DetroitDreamer,
    BudgetBoss,
    LegacyLeader,
}

impl BadgeKind {
    pub const ALL: [BadgeKind; 4] = [
        BadgeKind::LegacyStarter,
        BadgeKind::DetroitDreamer,
        BadgeKind::BudgetBoss,
        BadgeKind::LegacyLeader,
    ];

    #[must_use]
    pub const fn threshold(self) -> u32 {
        match self {
            BadgeKind::LegacyStarter => 0,
            BadgeKind::DetroitDreamer => 150,
            BadgeKind::BudgetBoss => 300,
            BadgeKind::LegacyLeader => 700,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            BadgeKind::LegacyStarter => "Legacy Starter",
            BadgeKind::DetroitDreamer => "Detroit Dreamer",
            BadgeKind::BudgetBoss => "Budget Boss",
            BadgeKind::LegacyLeader => "Legacy Leader",
        }
    }

    /// Stable key for styling hooks.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            BadgeKind::LegacyStarter => "starter",
            BadgeKind::DetroitDreamer => "student",
            BadgeKind::BudgetBoss => "budget",
            BadgeKind::LegacyLeader => "grad",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeStatus {
    pub kind: BadgeKind,
    pub unlocked: bool,
}

/// Evaluate every badge against an XP total. Nothing is persisted; callers
/// recompute on each render.
#[must_use]
pub fn evaluate_badges(xp: u32) -> [BadgeStatus; 4] {
    BadgeKind::ALL.map(|kind| BadgeStatus {
        kind,
        unlocked: xp >= kind.threshold(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unlocked(xp: u32) -> Vec<BadgeKind> {
        evaluate_badges(xp)
            .into_iter()
            .filter(|badge| badge.unlocked)
            .map(|badge| badge.kind)
            .collect()
    }

    #[test]
    fn starter_is_always_unlocked() {
        assert_eq!(unlocked(0), vec![BadgeKind::LegacyStarter]);
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(
            unlocked(300),
            vec![
                BadgeKind::LegacyStarter,
                BadgeKind::DetroitDreamer,
                BadgeKind::BudgetBoss
            ]
        );
        assert_eq!(unlocked(699).len(), 3);
        assert_eq!(unlocked(700).len(), 4);
    }
}
