use case_dispatch::assignment::{CaseDetail, CaseId, OrganizationId, OrganizationProfile};

const REGIONS: [&str; 4] = ["Shanghai", "Beijing", "Guangzhou", "Chengdu"];
const PRODUCTS: [&str; 4] = ["credit card", "consumer loan", "auto loan", "mortgage"];

/// Deterministic batch that exercises region, specialty and long-arrears matching.
pub(crate) fn synthetic_cases() -> Vec<CaseDetail> {
    (0..24u32)
        .map(|n| {
            let loan_amount = 20_000.0 + f64::from(n % 7) * 15_000.0;
            CaseDetail {
                id: CaseId(format!("case-{:03}", n + 1)),
                case_code: format!("AJ2024{:04}", n + 1),
                debtor_name: format!("Debtor {}", n + 1),
                debtor_id_card: format!("3101011990{:08}", n),
                debtor_phone: (n % 3 != 0).then(|| format!("1380000{:04}", n)),
                loan_amount,
                remaining_amount: loan_amount * (0.4 + f64::from(n % 5) * 0.1),
                overdue_days: 30 + (n * 37) % 400,
                region: REGIONS[(n % 4) as usize].to_string(),
                product_type: PRODUCTS[((n / 2) % 4) as usize].to_string(),
                account_age: 6 + n % 30,
            }
        })
        .collect()
}

struct RosterSeed {
    id: &'static str,
    name: &'static str,
    region: &'static str,
    capacity: u32,
    current_load: u32,
    success_rate: f64,
    avg_recovery_rate: f64,
    avg_disposal_days: f64,
    specialties: &'static [&'static str],
    is_active: bool,
}

const ROSTER: [RosterSeed; 5] = [
    RosterSeed {
        id: "org-east",
        name: "Eastern Recovery",
        region: "Shanghai",
        capacity: 120,
        current_load: 30,
        success_rate: 86.0,
        avg_recovery_rate: 38.0,
        avg_disposal_days: 45.0,
        specialties: &["credit card", "consumer loan"],
        is_active: true,
    },
    RosterSeed {
        id: "org-north",
        name: "Northern Legal Services",
        region: "Beijing",
        capacity: 80,
        current_load: 60,
        success_rate: 72.0,
        avg_recovery_rate: 28.0,
        avg_disposal_days: 75.0,
        specialties: &["mortgage", "长账龄"],
        is_active: true,
    },
    RosterSeed {
        id: "org-south",
        name: "Southern Asset Partners",
        region: "Guangzhou",
        capacity: 100,
        current_load: 20,
        success_rate: 81.0,
        avg_recovery_rate: 33.0,
        avg_disposal_days: 60.0,
        specialties: &["auto loan"],
        is_active: true,
    },
    RosterSeed {
        id: "org-west",
        name: "Western Mediation",
        region: "Chengdu",
        capacity: 60,
        current_load: 55,
        success_rate: 65.0,
        avg_recovery_rate: 22.0,
        avg_disposal_days: 110.0,
        specialties: &["consumer loan"],
        is_active: true,
    },
    // Inactive entry shows the eligibility gate in the demo output.
    RosterSeed {
        id: "org-idle",
        name: "Legacy Collections",
        region: "Shanghai",
        capacity: 50,
        current_load: 0,
        success_rate: 50.0,
        avg_recovery_rate: 15.0,
        avg_disposal_days: 150.0,
        specialties: &[],
        is_active: false,
    },
];

pub(crate) fn synthetic_roster() -> Vec<OrganizationProfile> {
    ROSTER
        .iter()
        .map(|seed| OrganizationProfile {
            id: OrganizationId(seed.id.to_string()),
            name: seed.name.to_string(),
            region: seed.region.to_string(),
            capacity: seed.capacity,
            current_load: seed.current_load,
            success_rate: seed.success_rate,
            avg_recovery_rate: seed.avg_recovery_rate,
            avg_disposal_days: seed.avg_disposal_days,
            specialties: seed.specialties.iter().map(|tag| tag.to_string()).collect(),
            rating: (seed.success_rate / 20.0).min(5.0),
            is_active: seed.is_active,
        })
        .collect()
}
