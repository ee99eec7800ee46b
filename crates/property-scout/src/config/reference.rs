//! Static reference tables used by the mock catalog and the report formatter.
//!
//! Lookups are keyed by the country's English name as it arrives from the
//! search form. Unknown countries fall back to generic values rather than
//! failing.

use crate::search::domain::Typology;
use serde::Serialize;

/// Currency metadata for a country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrencyInfo {
    pub currency: &'static str,
    pub symbol: &'static str,
    pub language: &'static str,
}

const DEFAULT_CURRENCY: CurrencyInfo = CurrencyInfo {
    currency: "EUR",
    symbol: "€",
    language: "en",
};

const fn currency(
    currency: &'static str,
    symbol: &'static str,
    language: &'static str,
) -> CurrencyInfo {
    CurrencyInfo {
        currency,
        symbol,
        language,
    }
}

const CURRENCIES: &[(&str, CurrencyInfo)] = &[
    ("Portugal", currency("EUR", "€", "pt")),
    ("Spain", currency("EUR", "€", "es")),
    ("Italy", currency("EUR", "€", "it")),
    ("France", currency("EUR", "€", "fr")),
    ("Greece", currency("EUR", "€", "el")),
    ("Germany", currency("EUR", "€", "de")),
    ("Netherlands", currency("EUR", "€", "nl")),
    ("Belgium", currency("EUR", "€", "nl")),
    ("Austria", currency("EUR", "€", "de")),
    ("Finland", currency("EUR", "€", "fi")),
    ("Ireland", currency("EUR", "€", "en")),
    ("United Kingdom", currency("GBP", "£", "en")),
    ("United States", currency("USD", "$", "en")),
    ("Canada", currency("CAD", "C$", "en")),
    ("Australia", currency("AUD", "A$", "en")),
    ("New Zealand", currency("NZD", "NZ$", "en")),
    ("Brazil", currency("BRL", "R$", "pt")),
    ("Mexico", currency("MXN", "MX$", "es")),
    ("Switzerland", currency("CHF", "CHF ", "de")),
    ("Sweden", currency("SEK", "kr ", "sv")),
    ("Norway", currency("NOK", "kr ", "no")),
    ("Denmark", currency("DKK", "kr ", "da")),
    ("Poland", currency("PLN", "zł ", "pl")),
    ("Czech Republic", currency("CZK", "Kč ", "cs")),
    ("Turkey", currency("TRY", "₺", "tr")),
    ("Japan", currency("JPY", "¥", "ja")),
    ("South Korea", currency("KRW", "₩", "ko")),
    ("Singapore", currency("SGD", "S$", "en")),
    ("United Arab Emirates", currency("AED", "AED ", "ar")),
    ("India", currency("INR", "₹", "hi")),
    ("China", currency("CNY", "¥", "zh")),
];

/// Currency for a country, defaulting to EUR when the country is unknown.
pub fn currency_for(country: &str) -> CurrencyInfo {
    let country = country.trim();
    CURRENCIES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(country))
        .map(|(_, info)| *info)
        .unwrap_or(DEFAULT_CURRENCY)
}

#[rustfmt::skip]
const CITIES_BY_COUNTRY: &[(&str, [&str; 10])] = &[
    ("Portugal", ["Lisboa", "Porto", "Coimbra", "Braga", "Setúbal", "Almada", "Cascais", "Amadora", "Faro", "Aveiro"]),
    ("Spain", ["Madrid", "Barcelona", "Valencia", "Seville", "Bilbao", "Málaga", "Zaragoza", "Murcia", "Palma", "Las Palmas"]),
    ("Italy", ["Rome", "Milan", "Naples", "Turin", "Palermo", "Genoa", "Bologna", "Florence", "Venice", "Verona"]),
    ("France", ["Paris", "Marseille", "Lyon", "Toulouse", "Nice", "Nantes", "Strasbourg", "Montpellier", "Bordeaux", "Lille"]),
    ("Germany", ["Berlin", "Munich", "Hamburg", "Frankfurt", "Cologne", "Stuttgart", "Düsseldorf", "Dortmund", "Essen", "Leipzig"]),
    ("United Kingdom", ["London", "Manchester", "Birmingham", "Liverpool", "Leeds", "Sheffield", "Bristol", "Edinburgh", "Glasgow", "Cardiff"]),
    ("United States", ["New York", "Los Angeles", "Chicago", "Houston", "Phoenix", "Philadelphia", "San Antonio", "San Diego", "Dallas", "Miami"]),
    ("Canada", ["Toronto", "Montreal", "Vancouver", "Calgary", "Edmonton", "Ottawa", "Winnipeg", "Quebec City", "Hamilton", "Victoria"]),
    ("Brazil", ["São Paulo", "Rio de Janeiro", "Brasília", "Salvador", "Fortaleza", "Belo Horizonte", "Manaus", "Curitiba", "Recife", "Porto Alegre"]),
    ("Mexico", ["Mexico City", "Guadalajara", "Monterrey", "Puebla", "Tijuana", "León", "Juárez", "Zapopan", "Mérida", "Querétaro"]),
    ("Netherlands", ["Amsterdam", "Rotterdam", "The Hague", "Utrecht", "Eindhoven", "Groningen", "Tilburg", "Almere", "Breda", "Nijmegen"]),
    ("Belgium", ["Brussels", "Antwerp", "Ghent", "Charleroi", "Liège", "Bruges", "Namur", "Leuven", "Mons", "Mechelen"]),
    ("Switzerland", ["Zurich", "Geneva", "Basel", "Lausanne", "Bern", "Winterthur", "Lucerne", "St. Gallen", "Lugano", "Biel"]),
    ("Austria", ["Vienna", "Graz", "Linz", "Salzburg", "Innsbruck", "Klagenfurt", "Villach", "Wels", "St. Pölten", "Dornbirn"]),
    ("Poland", ["Warsaw", "Kraków", "Łódź", "Wrocław", "Poznań", "Gdańsk", "Szczecin", "Bydgoszcz", "Lublin", "Katowice"]),
    ("Sweden", ["Stockholm", "Gothenburg", "Malmö", "Uppsala", "Västerås", "Örebro", "Linköping", "Helsingborg", "Jönköping", "Norrköping"]),
    ("Norway", ["Oslo", "Bergen", "Trondheim", "Stavanger", "Drammen", "Fredrikstad", "Kristiansand", "Sandnes", "Tromsø", "Sarpsborg"]),
    ("Denmark", ["Copenhagen", "Aarhus", "Odense", "Aalborg", "Esbjerg", "Randers", "Kolding", "Horsens", "Vejle", "Roskilde"]),
    ("Finland", ["Helsinki", "Espoo", "Tampere", "Vantaa", "Oulu", "Turku", "Jyväskylä", "Lahti", "Kuopio", "Pori"]),
    ("Greece", ["Athens", "Thessaloniki", "Patras", "Heraklion", "Larissa", "Volos", "Rhodes", "Ioannina", "Chania", "Chalcis"]),
    ("Czech Republic", ["Prague", "Brno", "Ostrava", "Plzeň", "Liberec", "Olomouc", "České Budějovice", "Hradec Králové", "Ústí nad Labem", "Pardubice"]),
    ("Ireland", ["Dublin", "Cork", "Limerick", "Galway", "Waterford", "Drogheda", "Dundalk", "Swords", "Bray", "Navan"]),
    ("Australia", ["Sydney", "Melbourne", "Brisbane", "Perth", "Adelaide", "Gold Coast", "Newcastle", "Canberra", "Wollongong", "Hobart"]),
    ("New Zealand", ["Auckland", "Wellington", "Christchurch", "Hamilton", "Tauranga", "Napier", "Dunedin", "Palmerston North", "Nelson", "Rotorua"]),
    ("Japan", ["Tokyo", "Osaka", "Yokohama", "Nagoya", "Sapporo", "Fukuoka", "Kobe", "Kyoto", "Kawasaki", "Saitama"]),
    ("South Korea", ["Seoul", "Busan", "Incheon", "Daegu", "Daejeon", "Gwangju", "Suwon", "Ulsan", "Changwon", "Goyang"]),
    ("Singapore", ["Singapore City", "Jurong", "Woodlands", "Tampines", "Bedok", "Hougang", "Clementi", "Yishun", "Bukit Batok", "Ang Mo Kio"]),
];

const FALLBACK_DISTRICTS: [&str; 10] = [
    "City Center",
    "North District",
    "South District",
    "East District",
    "West District",
    "Downtown",
    "Suburban Area A",
    "Suburban Area B",
    "Metropolitan Zone",
    "Coastal Region",
];

/// Cities used to seed the mock catalog for a country.
pub fn cities_for(country: &str) -> Vec<String> {
    let trimmed = country.trim();
    match CITIES_BY_COUNTRY
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
    {
        Some((_, cities)) => cities.iter().map(|city| city.to_string()).collect(),
        None => FALLBACK_DISTRICTS
            .iter()
            .map(|district| format!("{trimmed} - {district}"))
            .collect(),
    }
}

/// Countries with a curated city list.
pub fn known_countries() -> impl Iterator<Item = &'static str> {
    CITIES_BY_COUNTRY.iter().map(|(name, _)| *name)
}

/// Inclusive price band for a typology, denominated in the search currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBand {
    pub min: u64,
    pub max: u64,
}

impl PriceBand {
    pub fn contains(&self, price: u64) -> bool {
        (self.min..=self.max).contains(&price)
    }
}

pub const fn price_band(typology: Typology) -> PriceBand {
    let (min, max) = match typology {
        Typology::T0 => (50_000, 120_000),
        Typology::T1 => (70_000, 180_000),
        Typology::T2 => (90_000, 280_000),
        Typology::T3 => (120_000, 380_000),
        Typology::T4 => (180_000, 500_000),
        Typology::T4Plus => (220_000, 650_000),
    };
    PriceBand { min, max }
}

pub const AGENCIES: [&str; 12] = [
    "REMAX Portugal",
    "ERA Portugal",
    "Idealista",
    "Imovirtual",
    "Century 21 Portugal",
    "KW Portugal",
    "Zome",
    "Predimed",
    "Casa Sapo",
    "Supercasa",
    "Comprarcasa",
    "OLX Imóveis",
];

pub const AMENITIES: [&str; 11] = [
    "elevator",
    "parking",
    "balcony",
    "terrace",
    "garden",
    "swimming_pool",
    "air_conditioning",
    "central_heating",
    "double_glazing",
    "equipped_kitchen",
    "furnished",
];

pub const TRANSPORT_MINUTES: [u32; 5] = [5, 10, 15, 20, 30];

pub const ENERGY_RATINGS: [&str; 6] = ["A", "A+", "B", "B-", "C", "D"];

/// Cities whose listings carry a sub-district and the Setúbal region.
pub const GREATER_LISBON: [&str; 6] = [
    "Lisboa", "Almada", "Barreiro", "Seixal", "Amadora", "Cascais",
];

pub const LISBON_DISTRICTS: [&str; 5] = ["Centro", "Norte", "Sul", "Oriente", "Ocidente"];
