//! Demo dataset: a small direct lending book.
//!
//! 5 sectors, 8 borrowers, 6 lenders, 10 deals and 18 lender participations:
//! 29 nodes and 36 relationships. Ares Capital and HPS Investment sit in
//! several syndicates so the graph has visible hubs.

use lending_core::{EntityLabel, GraphNode, GraphRelationship};

pub struct BorrowerSeed {
    pub name: &'static str,
    pub sector: &'static str,
    pub revenue_mm: i64,
    pub ebitda_mm: i64,
    pub hq: &'static str,
}

pub struct LenderSeed {
    pub name: &'static str,
    pub lender_type: &'static str,
    pub aum_bn: f64,
}

pub struct DealSeed {
    pub name: &'static str,
    pub borrower: &'static str,
    pub deal_type: &'static str,
    pub amount_mm: i64,
    pub spread_bps: i64,
    pub maturity: &'static str,
}

pub struct ParticipationSeed {
    pub lender: &'static str,
    pub deal: &'static str,
    pub commitment_mm: i64,
    pub role: &'static str,
}

pub const SECTORS: &[&str] = &[
    "Healthcare",
    "Technology",
    "Industrials",
    "Business Services",
    "Consumer",
];

pub const BORROWERS: &[BorrowerSeed] = &[
    BorrowerSeed { name: "MedTech Solutions", sector: "Healthcare", revenue_mm: 120, ebitda_mm: 28, hq: "Boston, MA" },
    BorrowerSeed { name: "CloudSecure Inc", sector: "Technology", revenue_mm: 85, ebitda_mm: 18, hq: "Austin, TX" },
    BorrowerSeed { name: "PrecisionMfg Corp", sector: "Industrials", revenue_mm: 200, ebitda_mm: 42, hq: "Detroit, MI" },
    BorrowerSeed { name: "DataFlow Analytics", sector: "Technology", revenue_mm: 65, ebitda_mm: 14, hq: "San Francisco, CA" },
    BorrowerSeed { name: "ProStaff Holdings", sector: "Business Services", revenue_mm: 150, ebitda_mm: 32, hq: "Chicago, IL" },
    BorrowerSeed { name: "VitalCare Clinics", sector: "Healthcare", revenue_mm: 95, ebitda_mm: 22, hq: "Nashville, TN" },
    BorrowerSeed { name: "BrightHome Brands", sector: "Consumer", revenue_mm: 110, ebitda_mm: 20, hq: "Atlanta, GA" },
    BorrowerSeed { name: "Apex Logistics", sector: "Industrials", revenue_mm: 175, ebitda_mm: 38, hq: "Dallas, TX" },
];

pub const LENDERS: &[LenderSeed] = &[
    LenderSeed { name: "Ares Capital", lender_type: "BDC", aum_bn: 21.0 },
    LenderSeed { name: "HPS Investment", lender_type: "Credit Fund", aum_bn: 12.0 },
    LenderSeed { name: "Golub Capital", lender_type: "BDC", aum_bn: 9.5 },
    LenderSeed { name: "Blue Owl Capital", lender_type: "Credit Fund", aum_bn: 15.0 },
    LenderSeed { name: "Monroe Capital", lender_type: "Credit Fund", aum_bn: 4.2 },
    LenderSeed { name: "Owl Rock (Blue Owl)", lender_type: "BDC", aum_bn: 11.0 },
];

pub const DEALS: &[DealSeed] = &[
    DealSeed { name: "MedTech Term Loan A", borrower: "MedTech Solutions", deal_type: "Term Loan", amount_mm: 75, spread_bps: 550, maturity: "2029-06" },
    DealSeed { name: "MedTech Revolver", borrower: "MedTech Solutions", deal_type: "Revolver", amount_mm: 15, spread_bps: 500, maturity: "2028-06" },
    DealSeed { name: "CloudSecure Unitranche", borrower: "CloudSecure Inc", deal_type: "Unitranche", amount_mm: 50, spread_bps: 625, maturity: "2030-03" },
    DealSeed { name: "PrecisionMfg TL-B", borrower: "PrecisionMfg Corp", deal_type: "Term Loan B", amount_mm: 130, spread_bps: 500, maturity: "2029-12" },
    DealSeed { name: "DataFlow Growth Facility", borrower: "DataFlow Analytics", deal_type: "Delayed Draw TL", amount_mm: 40, spread_bps: 600, maturity: "2030-06" },
    DealSeed { name: "ProStaff Acquisition Fin", borrower: "ProStaff Holdings", deal_type: "Term Loan", amount_mm: 100, spread_bps: 575, maturity: "2029-09" },
    DealSeed { name: "VitalCare Unitranche", borrower: "VitalCare Clinics", deal_type: "Unitranche", amount_mm: 60, spread_bps: 650, maturity: "2030-01" },
    DealSeed { name: "BrightHome TL", borrower: "BrightHome Brands", deal_type: "Term Loan", amount_mm: 55, spread_bps: 525, maturity: "2029-03" },
    DealSeed { name: "Apex Logistics Refi", borrower: "Apex Logistics", deal_type: "Term Loan", amount_mm: 110, spread_bps: 475, maturity: "2028-12" },
    DealSeed { name: "Apex Revolver", borrower: "Apex Logistics", deal_type: "Revolver", amount_mm: 25, spread_bps: 425, maturity: "2027-12" },
];

pub const PARTICIPATIONS: &[ParticipationSeed] = &[
    ParticipationSeed { lender: "Ares Capital", deal: "MedTech Term Loan A", commitment_mm: 40, role: "Lead Arranger" },
    ParticipationSeed { lender: "HPS Investment", deal: "MedTech Term Loan A", commitment_mm: 35, role: "Participant" },
    ParticipationSeed { lender: "Ares Capital", deal: "MedTech Revolver", commitment_mm: 15, role: "Sole Lender" },
    ParticipationSeed { lender: "Blue Owl Capital", deal: "CloudSecure Unitranche", commitment_mm: 30, role: "Lead Arranger" },
    ParticipationSeed { lender: "Monroe Capital", deal: "CloudSecure Unitranche", commitment_mm: 20, role: "Participant" },
    ParticipationSeed { lender: "Ares Capital", deal: "PrecisionMfg TL-B", commitment_mm: 55, role: "Lead Arranger" },
    ParticipationSeed { lender: "Golub Capital", deal: "PrecisionMfg TL-B", commitment_mm: 40, role: "Participant" },
    ParticipationSeed { lender: "HPS Investment", deal: "PrecisionMfg TL-B", commitment_mm: 35, role: "Participant" },
    ParticipationSeed { lender: "HPS Investment", deal: "DataFlow Growth Facility", commitment_mm: 40, role: "Sole Lender" },
    ParticipationSeed { lender: "Blue Owl Capital", deal: "ProStaff Acquisition Fin", commitment_mm: 60, role: "Lead Arranger" },
    ParticipationSeed { lender: "Golub Capital", deal: "ProStaff Acquisition Fin", commitment_mm: 40, role: "Participant" },
    ParticipationSeed { lender: "Owl Rock (Blue Owl)", deal: "VitalCare Unitranche", commitment_mm: 60, role: "Sole Lender" },
    ParticipationSeed { lender: "Monroe Capital", deal: "BrightHome TL", commitment_mm: 30, role: "Lead Arranger" },
    ParticipationSeed { lender: "Owl Rock (Blue Owl)", deal: "BrightHome TL", commitment_mm: 25, role: "Participant" },
    ParticipationSeed { lender: "Ares Capital", deal: "Apex Logistics Refi", commitment_mm: 50, role: "Lead Arranger" },
    ParticipationSeed { lender: "Blue Owl Capital", deal: "Apex Logistics Refi", commitment_mm: 35, role: "Participant" },
    ParticipationSeed { lender: "Golub Capital", deal: "Apex Logistics Refi", commitment_mm: 25, role: "Participant" },
    ParticipationSeed { lender: "Ares Capital", deal: "Apex Revolver", commitment_mm: 25, role: "Sole Lender" },
];

/// A fixture relationship with endpoints given as (label, name).
pub struct FixtureLink {
    pub start: (EntityLabel, &'static str),
    pub relationship: GraphRelationship,
    pub end: (EntityLabel, &'static str),
}

/// All fixture nodes, in creation order.
pub fn nodes() -> Vec<GraphNode> {
    let sectors = SECTORS
        .iter()
        .map(|name| GraphNode::new(EntityLabel::Sector, *name));

    let borrowers = BORROWERS.iter().map(|b| {
        GraphNode::new(EntityLabel::Borrower, b.name)
            .with_property("revenue_mm", b.revenue_mm)
            .with_property("ebitda_mm", b.ebitda_mm)
            .with_property("hq", b.hq)
    });

    let lenders = LENDERS.iter().map(|l| {
        GraphNode::new(EntityLabel::Lender, l.name)
            .with_property("type", l.lender_type)
            .with_property("aum_bn", l.aum_bn)
    });

    let deals = DEALS.iter().map(|d| {
        GraphNode::new(EntityLabel::Deal, d.name)
            .with_property("type", d.deal_type)
            .with_property("amount_mm", d.amount_mm)
            .with_property("spread_bps", d.spread_bps)
            .with_property("maturity", d.maturity)
    });

    sectors.chain(borrowers).chain(lenders).chain(deals).collect()
}

/// All fixture relationships: IN_SECTOR, then BORROWED, then LENT_TO.
pub fn links() -> Vec<FixtureLink> {
    let in_sector = BORROWERS.iter().map(|b| FixtureLink {
        start: (EntityLabel::Borrower, b.name),
        relationship: GraphRelationship::new("IN_SECTOR"),
        end: (EntityLabel::Sector, b.sector),
    });

    let borrowed = DEALS.iter().map(|d| FixtureLink {
        start: (EntityLabel::Borrower, d.borrower),
        relationship: GraphRelationship::new("BORROWED"),
        end: (EntityLabel::Deal, d.name),
    });

    let lent_to = PARTICIPATIONS.iter().map(|p| FixtureLink {
        start: (EntityLabel::Lender, p.lender),
        relationship: GraphRelationship::new("LENT_TO")
            .with_property("commitment_mm", p.commitment_mm)
            .with_property("role", p.role),
        end: (EntityLabel::Deal, p.deal),
    });

    in_sector.chain(borrowed).chain(lent_to).collect()
}
