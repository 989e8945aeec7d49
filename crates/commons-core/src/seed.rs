// ── Sample directory ──
//
// A fixed set of programs and providers for offline use and demos. Ids
// are stable so detail lookups and routes work against the sample data.

use crate::model::{Location, Program, ProgramId, Provider, ProviderId, Schedule};

/// (name, description, start, area)
const PROGRAMS: &[(&str, &str, &str, &str)] = &[
    (
        "Emergency Food Relief Program",
        "Weekly food distribution and meal services for individuals and families experiencing food insecurity",
        "Ongoing",
        "Sydney CBD",
    ),
    (
        "Housing Support Services",
        "Assistance with finding affordable housing, tenancy support, and homelessness prevention programs",
        "Ongoing",
        "Western Sydney",
    ),
    (
        "Mental Health Counseling",
        "Free counseling services for individuals and families dealing with mental health challenges",
        "Ongoing",
        "Inner West Sydney",
    ),
    (
        "Youth Employment Program",
        "Job readiness training, resume building, and employment placement for disadvantaged young people",
        "February 2024",
        "South West Sydney",
    ),
    (
        "Family Support Services",
        "Parenting programs, family counseling, and support for families in crisis",
        "Ongoing",
        "Northern Beaches",
    ),
    (
        "Aged Care Support",
        "In-home care services, social activities, and support for elderly community members",
        "Ongoing",
        "Eastern Suburbs",
    ),
    (
        "Disability Services",
        "Support coordination, daily living assistance, and community participation programs",
        "Ongoing",
        "Sydney Metro",
    ),
    (
        "Multicultural Settlement Program",
        "Language classes, cultural orientation, and settlement support for new migrants and refugees",
        "March 2024",
        "South West Sydney",
    ),
    (
        "Financial Literacy Workshop",
        "Budgeting, debt management, and financial planning education for low-income individuals",
        "April 2024",
        "Western Sydney",
    ),
    (
        "Domestic Violence Support",
        "Crisis intervention, safety planning, and support services for victims of domestic violence",
        "Ongoing",
        "Sydney CBD",
    ),
    (
        "Community Garden Program",
        "Urban gardening initiative promoting food security and community connection",
        "May 2024",
        "Inner West Sydney",
    ),
    (
        "Digital Literacy Training",
        "Basic computer skills, internet safety, and digital inclusion programs for seniors and disadvantaged individuals",
        "June 2024",
        "Northern Beaches",
    ),
    (
        "Homeless Outreach Services",
        "Street outreach, emergency accommodation, and pathway to housing programs",
        "Ongoing",
        "Sydney CBD",
    ),
    (
        "Childcare Support Program",
        "Affordable childcare services and early childhood development programs for low-income families",
        "Ongoing",
        "Eastern Suburbs",
    ),
    (
        "Addiction Recovery Support",
        "Counseling, peer support groups, and rehabilitation programs for individuals with substance abuse issues",
        "Ongoing",
        "Western Sydney",
    ),
    (
        "Community Transport Service",
        "Affordable transport options for elderly and disabled community members to access essential services",
        "Ongoing",
        "Sydney Metro",
    ),
    (
        "Legal Aid Clinic",
        "Free legal advice and representation for disadvantaged individuals facing legal issues",
        "July 2024",
        "Sydney CBD",
    ),
    (
        "Skills Development Workshop",
        "Vocational training, certification programs, and job placement assistance for unemployed individuals",
        "August 2024",
        "South West Sydney",
    ),
    (
        "Community Health Program",
        "Health screenings, preventive care, and health education for underserved populations",
        "Ongoing",
        "Western Sydney",
    ),
    (
        "Social Inclusion Activities",
        "Community events, social groups, and recreational activities to combat social isolation",
        "Ongoing",
        "Sydney Metro",
    ),
];

const PROVIDERS: &[(&str, &str)] = &[
    (
        "Mission Australia",
        "Supporting disadvantaged individuals and families through housing, employment, and community services across Sydney",
    ),
    (
        "Salvation Army",
        "Providing emergency relief, housing support, and community programs for vulnerable populations in Sydney",
    ),
    (
        "St Vincent de Paul Society",
        "Offering financial assistance, food support, and community services to those in need across Sydney",
    ),
    (
        "Anglicare Sydney",
        "Delivering aged care, disability services, and community support programs throughout Sydney",
    ),
    (
        "Uniting Care",
        "Supporting families, children, and individuals with mental health, housing, and community services",
    ),
    (
        "CatholicCare Sydney",
        "Providing counseling, family support, and community services to vulnerable individuals and families",
    ),
    (
        "Wesley Mission",
        "Offering homelessness services, mental health support, and community programs across Sydney",
    ),
    (
        "Red Cross Australia",
        "Emergency relief, disaster recovery, and community support services for disadvantaged populations",
    ),
    (
        "Foodbank NSW",
        "Fighting hunger by providing food relief to charities and community organizations across Sydney",
    ),
    (
        "Youth Off The Streets",
        "Supporting homeless and disadvantaged young people through education, housing, and life skills programs",
    ),
    (
        "Sydney Community Services",
        "Local community support including aged care, disability services, and family support programs",
    ),
    (
        "Inner West Community Services",
        "Providing community development, family support, and social inclusion programs in Sydney's Inner West",
    ),
    (
        "South West Sydney Community Services",
        "Supporting multicultural communities with settlement services, family support, and community programs",
    ),
    (
        "Northern Beaches Community Services",
        "Delivering aged care, disability support, and community programs across the Northern Beaches",
    ),
    (
        "Eastern Suburbs Community Services",
        "Supporting vulnerable families and individuals with counseling, housing, and community programs",
    ),
    (
        "Western Sydney Community Services",
        "Providing multicultural support, youth services, and community development programs in Western Sydney",
    ),
    (
        "Sydney Homeless Connect",
        "Connecting homeless individuals with essential services, housing support, and community resources",
    ),
    (
        "Community First Step",
        "Supporting families and individuals with mental health services, housing support, and community programs",
    ),
    (
        "Sydney Community Housing",
        "Providing affordable housing solutions and tenancy support for disadvantaged individuals and families",
    ),
    (
        "Multicultural Community Services",
        "Supporting culturally and linguistically diverse communities with settlement, family, and community services",
    ),
];

/// The sample programs, in display order.
pub fn programs() -> Vec<Program> {
    PROGRAMS
        .iter()
        .enumerate()
        .map(|(i, (name, description, start, area))| Program {
            id: ProgramId::new(format!("seed-program-{:02}", i + 1)),
            name: (*name).to_owned(),
            category: None,
            description: Some((*description).to_owned()),
            schedule: Schedule {
                date_interval: Some((*start).to_owned()),
                ..Schedule::default()
            },
            location: Location {
                address: Some((*area).to_owned()),
                ..Location::default()
            },
            provider: None,
            approved: Some(true),
        })
        .collect()
}

/// The sample providers, in display order.
pub fn providers() -> Vec<Provider> {
    PROVIDERS
        .iter()
        .enumerate()
        .map(|(i, (name, description))| Provider {
            id: ProviderId::new(format!("seed-provider-{:02}", i + 1)),
            name: (*name).to_owned(),
            description: Some((*description).to_owned()),
            programs: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_sizes() {
        assert_eq!(programs().len(), 20);
        assert_eq!(providers().len(), 20);
    }

    #[test]
    fn ids_are_unique_and_stable() {
        let programs = programs();
        assert_eq!(programs[0].id.as_str(), "seed-program-01");
        let mut ids: Vec<_> = programs.iter().map(|p| p.id.clone()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }
}
