//! Census-style records and the predicates commonly counted over them.

use rand::seq::SliceRandom;
use rand::Rng;

/// Recorded sex of a respondent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Sex {
    /// Female.
    Female,
    /// Male.
    #[default]
    Male,
}

/// Annual income bracket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum IncomeBracket {
    /// At most 50K.
    #[default]
    AtMost50K,
    /// Above 50K.
    Above50K,
}

/// A single census respondent.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct CensusRecord {
    /// Age in years.
    pub age: u32,
    /// Employer category.
    pub workclass: String,
    /// Highest education attained.
    pub education: String,
    /// Years of education.
    pub education_num: u32,
    /// Marital status.
    pub marital_status: String,
    /// Occupation.
    pub occupation: String,
    /// Relationship within the household.
    pub relationship: String,
    /// Race.
    pub race: String,
    /// Sex.
    pub sex: Sex,
    /// Capital gains.
    pub capital_gain: u64,
    /// Capital losses.
    pub capital_loss: u64,
    /// Usual hours worked per week.
    pub hours_per_week: u32,
    /// Country of origin.
    pub native_country: String,
    /// Income bracket.
    pub income: IncomeBracket,
}

impl CensusRecord {
    /// A record with the given age and defaults elsewhere.
    pub fn new(age: u32) -> Self {
        Self {
            age,
            ..Self::default()
        }
    }

    /// Set the sex.
    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = sex;
        self
    }

    /// Set the income bracket.
    pub fn with_income(mut self, income: IncomeBracket) -> Self {
        self.income = income;
        self
    }

    /// Set education and years of education.
    pub fn with_education(mut self, education: impl Into<String>, education_num: u32) -> Self {
        self.education = education.into();
        self.education_num = education_num;
        self
    }

    /// Set the occupation.
    pub fn with_occupation(mut self, occupation: impl Into<String>) -> Self {
        self.occupation = occupation.into();
        self
    }

    /// Set the weekly hours worked.
    pub fn with_hours_per_week(mut self, hours: u32) -> Self {
        self.hours_per_week = hours;
        self
    }

    /// Set the country of origin.
    pub fn with_native_country(mut self, country: impl Into<String>) -> Self {
        self.native_country = country.into();
        self
    }
}

/// Records at least `min_age` years old.
pub fn age_at_least(min_age: u32) -> impl Fn(&CensusRecord) -> bool + Clone {
    move |r: &CensusRecord| r.age >= min_age
}

/// Records earning above 50K.
pub fn earns_above_50k(r: &CensusRecord) -> bool {
    r.income == IncomeBracket::Above50K
}

/// Records of the given sex.
pub fn has_sex(sex: Sex) -> impl Fn(&CensusRecord) -> bool + Clone {
    move |r: &CensusRecord| r.sex == sex
}

/// Number of ten-year age bins covered by [`age_decade`].
pub const AGE_DECADES: usize = 10;

/// Ten-year age bin, `0..AGE_DECADES`; ages of 100 and over share the last bin.
pub fn age_decade(r: &CensusRecord) -> Option<usize> {
    Some(((r.age / 10) as usize).min(AGE_DECADES - 1))
}

const EDUCATION: &[(&str, u32)] = &[
    ("HS-grad", 9),
    ("Some-college", 10),
    ("Bachelors", 13),
    ("Masters", 14),
    ("Doctorate", 16),
    ("11th", 7),
];

const OCCUPATIONS: &[&str] = &[
    "Adm-clerical",
    "Craft-repair",
    "Exec-managerial",
    "Prof-specialty",
    "Sales",
    "Tech-support",
];

/// Generate `n` synthetic census records for demos and tests.
pub fn synthetic_census<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<CensusRecord> {
    (0..n)
        .map(|_| {
            let (education, education_num) =
                EDUCATION.choose(rng).copied().unwrap_or(("HS-grad", 9));
            let occupation = OCCUPATIONS.choose(rng).copied().unwrap_or("Sales");
            let sex = if rng.gen_bool(0.5) { Sex::Female } else { Sex::Male };
            let income = if rng.gen_bool(0.24) {
                IncomeBracket::Above50K
            } else {
                IncomeBracket::AtMost50K
            };
            CensusRecord {
                age: rng.gen_range(17..=90),
                workclass: "Private".to_string(),
                education: education.to_string(),
                education_num,
                marital_status: "Never-married".to_string(),
                occupation: occupation.to_string(),
                relationship: "Not-in-family".to_string(),
                race: "White".to_string(),
                sex,
                capital_gain: 0,
                capital_loss: 0,
                hours_per_week: rng.gen_range(10..=60),
                native_country: "United-States".to_string(),
                income,
            }
        })
        .collect()
}
