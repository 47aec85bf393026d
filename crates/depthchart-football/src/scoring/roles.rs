// Role catalog: weighted metric sets per role bucket.

use crate::taxonomy::RoleBucket;

/// One scouting role: a name and the metrics that define it.
///
/// Weights are relative importance within the role. They need not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleDef {
    pub name: &'static str,
    pub metrics: &'static [(&'static str, f64)],
}

const GK_ROLES: &[RoleDef] = &[
    RoleDef {
        name: "Shot Stopper GK",
        metrics: &[("Prevented goals per 90", 3.0), ("Save rate, %", 1.0)],
    },
    RoleDef {
        name: "Ball Playing GK",
        metrics: &[
            ("Passes per 90", 1.0),
            ("Accurate passes, %", 3.0),
            ("Accurate long passes, %", 2.0),
        ],
    },
    RoleDef {
        name: "Sweeper GK",
        metrics: &[("Exits per 90", 1.0)],
    },
];

const CB_ROLES: &[RoleDef] = &[
    RoleDef {
        name: "Ball Playing CB",
        metrics: &[
            ("Passes per 90", 2.0),
            ("Accurate passes, %", 2.0),
            ("Forward passes per 90", 2.0),
            ("Accurate forward passes, %", 2.0),
            ("Progressive passes per 90", 2.0),
            ("Progressive runs per 90", 1.5),
            ("Dribbles per 90", 1.5),
            ("Accurate long passes, %", 1.0),
            ("Passes to final third per 90", 1.5),
        ],
    },
    RoleDef {
        name: "Wide CB",
        metrics: &[
            ("Defensive duels per 90", 1.5),
            ("Defensive duels won, %", 2.0),
            ("Dribbles per 90", 2.0),
            ("Forward passes per 90", 1.0),
            ("Progressive passes per 90", 1.0),
            ("Progressive runs per 90", 2.0),
        ],
    },
    RoleDef {
        name: "Box Defender",
        metrics: &[
            ("Aerial duels per 90", 1.0),
            ("Aerial duels won, %", 3.0),
            ("PAdj Interceptions", 2.0),
            ("Shots blocked per 90", 1.0),
            ("Defensive duels won, %", 4.0),
        ],
    },
];

const FB_ROLES: &[RoleDef] = &[
    RoleDef {
        name: "Build Up FB",
        metrics: &[
            ("Passes per 90", 2.0),
            ("Accurate passes, %", 1.5),
            ("Forward passes per 90", 2.0),
            ("Accurate forward passes, %", 2.0),
            ("Progressive passes per 90", 2.5),
            ("Progressive runs per 90", 2.0),
            ("Dribbles per 90", 2.0),
            ("Passes to final third per 90", 2.0),
            ("xA per 90", 1.0),
        ],
    },
    RoleDef {
        name: "Attacking FB",
        metrics: &[
            ("Crosses per 90", 2.0),
            ("Dribbles per 90", 3.5),
            ("Accelerations per 90", 1.0),
            ("Successful dribbles, %", 1.0),
            ("Touches in box per 90", 2.0),
            ("Progressive runs per 90", 3.0),
            ("Passes to penalty area per 90", 2.0),
            ("xA per 90", 3.0),
        ],
    },
    RoleDef {
        name: "Defensive FB",
        metrics: &[
            ("Aerial duels per 90", 1.0),
            ("Aerial duels won, %", 1.5),
            ("Defensive duels per 90", 2.0),
            ("PAdj Interceptions", 3.0),
            ("Shots blocked per 90", 1.0),
            ("Defensive duels won, %", 3.5),
        ],
    },
];

const CM_ROLES: &[RoleDef] = &[
    RoleDef {
        name: "Deep Playmaker CM",
        metrics: &[
            ("Passes per 90", 1.0),
            ("Accurate passes, %", 1.0),
            ("Forward passes per 90", 2.0),
            ("Accurate forward passes, %", 1.5),
            ("Progressive passes per 90", 3.0),
            ("Passes to final third per 90", 2.5),
            ("Accurate long passes, %", 1.0),
        ],
    },
    RoleDef {
        name: "Advanced Playmaker CM",
        metrics: &[
            ("Deep completions per 90", 1.5),
            ("Smart passes per 90", 2.0),
            ("xA per 90", 4.0),
            ("Passes to penalty area per 90", 2.0),
        ],
    },
    RoleDef {
        name: "Defensive CM",
        metrics: &[
            ("Defensive duels per 90", 4.0),
            ("Defensive duels won, %", 4.0),
            ("PAdj Interceptions", 3.0),
            ("Aerial duels per 90", 0.5),
            ("Aerial duels won, %", 1.0),
        ],
    },
    RoleDef {
        name: "Ball Carrying CM",
        metrics: &[
            ("Dribbles per 90", 4.0),
            ("Successful dribbles, %", 2.0),
            ("Progressive runs per 90", 3.0),
            ("Accelerations per 90", 3.0),
        ],
    },
];

const ATT_ROLES: &[RoleDef] = &[
    RoleDef {
        name: "Playmaker ATT",
        metrics: &[
            ("Passes per 90", 2.0),
            ("xA per 90", 3.0),
            ("Key passes per 90", 1.0),
            ("Deep completions per 90", 1.5),
            ("Smart passes per 90", 1.5),
            ("Passes to penalty area per 90", 2.0),
        ],
    },
    RoleDef {
        name: "Goal Threat ATT",
        metrics: &[
            ("xG per 90", 3.0),
            ("Non-penalty goals per 90", 3.0),
            ("Shots per 90", 2.0),
            ("Touches in box per 90", 2.0),
        ],
    },
    RoleDef {
        name: "Ball Carrier ATT",
        metrics: &[
            ("Dribbles per 90", 4.0),
            ("Successful dribbles, %", 2.0),
            ("Progressive runs per 90", 3.0),
            ("Accelerations per 90", 3.0),
        ],
    },
];

const CF_ROLES: &[RoleDef] = &[
    RoleDef {
        name: "Target Man CF",
        metrics: &[("Aerial duels per 90", 3.0), ("Aerial duels won, %", 5.0)],
    },
    RoleDef {
        name: "Goal Threat CF",
        metrics: &[
            ("Non-penalty goals per 90", 3.0),
            ("Shots per 90", 1.5),
            ("xG per 90", 3.0),
            ("Touches in box per 90", 1.0),
            ("Shots on target, %", 0.5),
        ],
    },
    RoleDef {
        name: "Link Up CF",
        metrics: &[
            ("Passes per 90", 2.0),
            ("Passes to penalty area per 90", 1.5),
            ("Deep completions per 90", 1.0),
            ("Smart passes per 90", 1.5),
            ("Accurate passes, %", 1.5),
            ("Key passes per 90", 1.0),
            ("Dribbles per 90", 2.0),
            ("Successful dribbles, %", 1.0),
            ("Progressive runs per 90", 2.0),
            ("xA per 90", 3.0),
        ],
    },
];

/// Role definitions for a bucket, in catalog order.
pub fn roles_for(bucket: RoleBucket) -> &'static [RoleDef] {
    match bucket {
        RoleBucket::Goalkeeper => GK_ROLES,
        RoleBucket::CentreBack => CB_ROLES,
        RoleBucket::FullBack => FB_ROLES,
        RoleBucket::Midfield => CM_ROLES,
        RoleBucket::Attack => ATT_ROLES,
        RoleBucket::CentreForward => CF_ROLES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::ROLE_BUCKETS;

    #[test]
    fn every_bucket_has_roles() {
        for bucket in ROLE_BUCKETS {
            assert!(!roles_for(*bucket).is_empty(), "{bucket}");
        }
        assert_eq!(roles_for(RoleBucket::Midfield).len(), 4);
        assert_eq!(roles_for(RoleBucket::CentreBack).len(), 3);
    }

    #[test]
    fn weights_are_positive() {
        for bucket in ROLE_BUCKETS {
            for role in roles_for(*bucket) {
                assert!(!role.metrics.is_empty(), "{}", role.name);
                for (metric, w) in role.metrics {
                    assert!(*w > 0.0, "{} / {}", role.name, metric);
                }
            }
        }
    }

    #[test]
    fn role_names_are_unique_across_buckets() {
        let mut names: Vec<&str> = ROLE_BUCKETS
            .iter()
            .flat_map(|b| roles_for(*b).iter().map(|r| r.name))
            .collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
