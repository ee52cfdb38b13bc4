//! Crop registry for the recommendation client.
//!
//! Defines the canonical catalog of crops the prediction service is known to
//! return, along with the agronomic and economic metadata the service does
//! not send (season, water need, market price, investment). The enrichment
//! step and the chat helper both read from here.
//!
//! Lookups are case-insensitive on the crop key. Every attribute has a
//! `DEFAULT_*` constant returned for crops outside the catalog.

// ---------------------------------------------------------------------------
// Defaults for crops outside the catalog
// ---------------------------------------------------------------------------

pub const DEFAULT_SEASON: &str = "Seasonal";
pub const DEFAULT_WATER_REQUIREMENT: &str = "Medium";
/// Rupees per tonne.
pub const DEFAULT_MARKET_PRICE: u32 = 20_000;
/// Rupees per hectare.
pub const DEFAULT_INVESTMENT_REQUIRED: u32 = 40_000;

/// Bumped whenever a value in `CROP_REGISTRY` changes.
pub const REGISTRY_VERSION: u32 = 2;

// ---------------------------------------------------------------------------
// Crop metadata
// ---------------------------------------------------------------------------

/// Cultivation guide shown by the chat helper. Only the field crops the
/// assistant has been written up for carry one.
pub struct AgronomySheet {
    /// Heading used in chat replies, e.g. "Maize/Corn".
    pub title: &'static str,
    /// Extra words that should also match this crop in chat text.
    pub aliases: &'static [&'static str],
    pub duration: &'static str,
    pub soil: &'static str,
    pub ph: &'static str,
    pub temperature: &'static str,
    pub rainfall: &'static str,
    pub irrigation: &'static str,
    pub npk: &'static str,
    pub diseases: &'static str,
    pub pests: &'static str,
    pub typical_yield: &'static str,
    pub market_price: &'static str,
    pub tips: &'static str,
}

/// Metadata for a single crop.
pub struct CropProfile {
    /// Lower-case identifier as returned by the prediction service.
    pub key: &'static str,
    pub season: &'static str,
    /// "Low", "Medium" or "High".
    pub water_requirement: &'static str,
    /// Rupees per tonne.
    pub market_price: u32,
    /// Rupees per hectare.
    pub investment_required: u32,
    pub agronomy: Option<AgronomySheet>,
}

/// All crops with known metadata. Crops with an agronomy sheet come first,
/// in the order the chat helper should try them.
pub static CROP_REGISTRY: &[CropProfile] = &[
    CropProfile {
        key: "rice",
        season: "Monsoon (Kharif)",
        water_requirement: "High",
        market_price: 22_000,
        investment_required: 40_000,
        agronomy: Some(AgronomySheet {
            title: "Rice",
            aliases: &["paddy"],
            duration: "120-150 days",
            soil: "Clay loam, loamy soil with good water retention",
            ph: "5.5-7.0",
            temperature: "21-37°C",
            rainfall: "100-200 cm annually",
            irrigation: "High water requirement, flooded conditions",
            npk: "N: 80-120 kg/ha, P: 40-60 kg/ha, K: 40-60 kg/ha",
            diseases: "Blast, Bacterial blight, Sheath blight, Brown spot",
            pests: "Stem borer, Leaf folder, Brown plant hopper",
            typical_yield: "4-6 tons/hectare",
            market_price: "₹2000-2500 per quintal",
            tips: "Ensure proper water management, use disease-resistant varieties, maintain proper spacing",
        }),
    },
    CropProfile {
        key: "wheat",
        season: "Winter (Rabi)",
        water_requirement: "Medium",
        market_price: 25_000,
        investment_required: 35_000,
        agronomy: Some(AgronomySheet {
            title: "Wheat",
            aliases: &[],
            duration: "110-130 days",
            soil: "Loamy soil with good drainage",
            ph: "6.0-7.5",
            temperature: "10-25°C",
            rainfall: "50-75 cm",
            irrigation: "4-6 irrigations required",
            npk: "N: 120-150 kg/ha, P: 60 kg/ha, K: 40 kg/ha",
            diseases: "Rust diseases, Powdery mildew, Loose smut",
            pests: "Aphids, Termites, Army worm",
            typical_yield: "4-5 tons/hectare",
            market_price: "₹1800-2200 per quintal",
            tips: "Timely sowing is crucial, apply fertilizers in splits, control weeds early",
        }),
    },
    CropProfile {
        key: "maize",
        season: "Summer/Monsoon",
        water_requirement: "Medium",
        market_price: 18_000,
        investment_required: 30_000,
        agronomy: Some(AgronomySheet {
            title: "Maize/Corn",
            aliases: &["corn"],
            duration: "80-110 days",
            soil: "Well-drained loamy soil",
            ph: "5.5-7.5",
            temperature: "21-27°C",
            rainfall: "50-75 cm",
            irrigation: "Moderate, critical at flowering and grain filling",
            npk: "N: 120 kg/ha, P: 60 kg/ha, K: 40 kg/ha",
            diseases: "Maydis leaf blight, Turcicum leaf blight, Stalk rot",
            pests: "Fall army worm, Stem borer, Shoot fly",
            typical_yield: "5-7 tons/hectare",
            market_price: "₹1600-2000 per quintal",
            tips: "Plant at proper spacing, ensure good drainage, protect from army worm",
        }),
    },
    CropProfile {
        key: "cotton",
        season: "Monsoon (Kharif)",
        water_requirement: "Medium",
        market_price: 35_000,
        investment_required: 50_000,
        agronomy: Some(AgronomySheet {
            title: "Cotton",
            aliases: &[],
            duration: "150-180 days",
            soil: "Black cotton soil, well-drained loamy soil",
            ph: "6.0-7.5",
            temperature: "21-30°C",
            rainfall: "50-100 cm",
            irrigation: "5-7 irrigations required",
            npk: "N: 100-120 kg/ha, P: 50-60 kg/ha, K: 50-60 kg/ha",
            diseases: "Wilt, Root rot, Leaf spot, Boll rot",
            pests: "Bollworm, Aphids, Jassids, Whitefly",
            typical_yield: "20-25 quintals/hectare (lint)",
            market_price: "₹5500-6500 per quintal",
            tips: "Use Bt cotton varieties, integrated pest management, proper spacing and pruning",
        }),
    },
    CropProfile {
        key: "sugarcane",
        season: "Year-round (perennial)",
        water_requirement: "High",
        market_price: 3_000,
        investment_required: 80_000,
        agronomy: Some(AgronomySheet {
            title: "Sugarcane",
            aliases: &[],
            duration: "10-18 months",
            soil: "Deep, well-drained loamy soil",
            ph: "6.5-7.5",
            temperature: "20-26°C for germination, 30-35°C for growth",
            rainfall: "75-150 cm",
            irrigation: "Heavy water requirement, 15-20 irrigations",
            npk: "N: 200-250 kg/ha, P: 80-100 kg/ha, K: 100-150 kg/ha",
            diseases: "Red rot, Smut, Wilt, Rust",
            pests: "Early shoot borer, Top borer, Pyrilla",
            typical_yield: "70-100 tons/hectare",
            market_price: "₹280-350 per quintal",
            tips: "Select disease-free seed cane, proper trash mulching, earthing up is essential",
        }),
    },
    CropProfile {
        key: "chickpea",
        season: "Winter (Rabi)",
        water_requirement: "Low",
        market_price: 50_000,
        investment_required: 30_000,
        agronomy: Some(AgronomySheet {
            title: "Chickpea/Gram",
            aliases: &["gram"],
            duration: "100-120 days",
            soil: "Well-drained loamy to clay loam soil",
            ph: "6.0-7.5",
            temperature: "20-25°C",
            rainfall: "40-50 cm",
            irrigation: "2-3 light irrigations",
            npk: "N: 20 kg/ha, P: 40-60 kg/ha, K: 20 kg/ha (fixes own nitrogen)",
            diseases: "Wilt, Blight, Root rot, Rust",
            pests: "Pod borer, Aphids, Cut worm",
            typical_yield: "1.5-2.5 tons/hectare",
            market_price: "₹4500-5500 per quintal",
            tips: "Treat seeds with Rhizobium, avoid waterlogging, spray for pod borer",
        }),
    },
    CropProfile {
        key: "potato",
        season: "Winter (Rabi)",
        water_requirement: "Medium",
        market_price: 11_500,
        investment_required: 70_000,
        agronomy: Some(AgronomySheet {
            title: "Potato",
            aliases: &[],
            duration: "90-120 days",
            soil: "Well-drained loamy soil rich in organic matter",
            ph: "5.5-6.5",
            temperature: "15-25°C",
            rainfall: "50-70 cm",
            irrigation: "Regular light irrigations, 8-10 times",
            npk: "N: 150-180 kg/ha, P: 80-100 kg/ha, K: 100-120 kg/ha",
            diseases: "Late blight, Early blight, Wilt, Leaf roll virus",
            pests: "Aphids, Potato tuber moth, Cut worm",
            typical_yield: "25-35 tons/hectare",
            market_price: "₹800-1500 per quintal",
            tips: "Use certified seed tubers, earthing up is crucial, store in cool dry place",
        }),
    },
    CropProfile {
        key: "tomato",
        season: "Year-round (protected cultivation)",
        water_requirement: "Medium",
        market_price: 20_000,
        investment_required: 75_000,
        agronomy: Some(AgronomySheet {
            title: "Tomato",
            aliases: &[],
            duration: "60-80 days (after transplanting)",
            soil: "Well-drained loamy soil rich in organic matter",
            ph: "6.0-7.0",
            temperature: "20-30°C",
            rainfall: "Moderate, 60-150 cm",
            irrigation: "Regular irrigation, drip irrigation preferred",
            npk: "N: 100-120 kg/ha, P: 80 kg/ha, K: 60 kg/ha",
            diseases: "Early blight, Late blight, Leaf curl virus, Wilt",
            pests: "Fruit borer, Whitefly, Leaf miner",
            typical_yield: "40-60 tons/hectare",
            market_price: "₹1000-3000 per quintal (seasonal variation)",
            tips: "Use staking for support, regular pruning, mulching helps retain moisture",
        }),
    },
    CropProfile {
        key: "banana",
        season: "Year-round",
        water_requirement: "High",
        market_price: 15_000,
        investment_required: 60_000,
        agronomy: None,
    },
    CropProfile {
        key: "mango",
        season: "Summer",
        water_requirement: "Medium",
        market_price: 40_000,
        investment_required: 100_000,
        agronomy: None,
    },
    CropProfile {
        key: "apple",
        season: "Winter",
        water_requirement: "Low",
        market_price: 45_000,
        investment_required: 120_000,
        agronomy: None,
    },
    CropProfile {
        key: "grapes",
        season: "Winter",
        water_requirement: "Low",
        market_price: 30_000,
        investment_required: 90_000,
        agronomy: None,
    },
];

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Looks up a crop by key, ignoring case and surrounding whitespace.
/// Returns `None` if the crop is not in the catalog.
pub fn find_crop(crop: &str) -> Option<&'static CropProfile> {
    let crop = crop.trim();
    CROP_REGISTRY.iter().find(|c| c.key.eq_ignore_ascii_case(crop))
}

pub fn season_for(crop: &str) -> &'static str {
    find_crop(crop).map(|c| c.season).unwrap_or(DEFAULT_SEASON)
}

pub fn water_requirement_for(crop: &str) -> &'static str {
    find_crop(crop)
        .map(|c| c.water_requirement)
        .unwrap_or(DEFAULT_WATER_REQUIREMENT)
}

pub fn market_price_for(crop: &str) -> u32 {
    find_crop(crop)
        .map(|c| c.market_price)
        .unwrap_or(DEFAULT_MARKET_PRICE)
}

pub fn investment_required_for(crop: &str) -> u32 {
    find_crop(crop)
        .map(|c| c.investment_required)
        .unwrap_or(DEFAULT_INVESTMENT_REQUIRED)
}

/// Crops that have a cultivation guide, in registry order.
pub fn crops_with_agronomy() -> impl Iterator<Item = (&'static CropProfile, &'static AgronomySheet)> {
    CROP_REGISTRY
        .iter()
        .filter_map(|c| c.agronomy.as_ref().map(|sheet| (c, sheet)))
}

pub fn all_crop_keys() -> Vec<&'static str> {
    CROP_REGISTRY.iter().map(|c| c.key).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
