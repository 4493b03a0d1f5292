//! The closed, ordered set of interest categories.
//!
//! Vectors are compared positionally, so [`InterestCategory::ALL`] is the only
//! place the order is defined. Reordering or renaming a variant invalidates
//! every persisted vector.
//!
//! # Examples
//! ```
//! use kindred_core::InterestCategory;
//!
//! assert_eq!(InterestCategory::FoodCooking.as_str(), "foodCooking");
//! assert_eq!(InterestCategory::Adventure.index(), 0);
//! assert_eq!(InterestCategory::ALL.len(), kindred_core::CATEGORY_COUNT);
//! ```

/// Number of categories in the closed set.
pub const CATEGORY_COUNT: usize = 30;

/// A single interest dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InterestCategory {
    /// Adventure and thrill seeking.
    Adventure,
    /// Creative pursuits.
    Creativity,
    /// Fitness and exercise.
    Fitness,
    /// Technology and gadgets.
    Technology,
    /// Food and cooking.
    FoodCooking,
    /// Reading.
    Reading,
    /// Movies and television.
    MoviesTv,
    /// Music.
    Music,
    /// Travel.
    Travel,
    /// Going out and meeting people.
    Socializing,
    /// Quiet nights in.
    QuietNightsIn,
    /// Hiking.
    Hiking,
    /// Video and computer games.
    Gaming,
    /// Sports.
    Sports,
    /// Comedy.
    Comedy,
    /// Art and museums.
    ArtMuseums,
    /// Politics.
    Politics,
    /// Science.
    Science,
    /// Spirituality.
    Spirituality,
    /// Pets.
    Pets,
    /// Fashion.
    Fashion,
    /// DIY and crafts.
    DiyCrafts,
    /// Volunteering.
    Volunteering,
    /// Board games.
    BoardGames,
    /// History.
    History,
    /// Sustainability.
    Sustainability,
    /// Concerts, theatre and other live events.
    LiveEvents,
    /// Personal growth.
    PersonalGrowth,
    /// Photography.
    Photography,
    /// Gardening.
    Gardening,
}

impl InterestCategory {
    /// Every category in positional order.
    pub const ALL: [Self; CATEGORY_COUNT] = [
        Self::Adventure,
        Self::Creativity,
        Self::Fitness,
        Self::Technology,
        Self::FoodCooking,
        Self::Reading,
        Self::MoviesTv,
        Self::Music,
        Self::Travel,
        Self::Socializing,
        Self::QuietNightsIn,
        Self::Hiking,
        Self::Gaming,
        Self::Sports,
        Self::Comedy,
        Self::ArtMuseums,
        Self::Politics,
        Self::Science,
        Self::Spirituality,
        Self::Pets,
        Self::Fashion,
        Self::DiyCrafts,
        Self::Volunteering,
        Self::BoardGames,
        Self::History,
        Self::Sustainability,
        Self::LiveEvents,
        Self::PersonalGrowth,
        Self::Photography,
        Self::Gardening,
    ];

    /// Return the wire name used in classifier prompts, responses and storage.
    ///
    /// # Examples
    /// ```
    /// use kindred_core::InterestCategory;
    ///
    /// assert_eq!(InterestCategory::MoviesTv.as_str(), "moviesTV");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adventure => "adventure",
            Self::Creativity => "creativity",
            Self::Fitness => "fitness",
            Self::Technology => "technology",
            Self::FoodCooking => "foodCooking",
            Self::Reading => "reading",
            Self::MoviesTv => "moviesTV",
            Self::Music => "music",
            Self::Travel => "travel",
            Self::Socializing => "socializing",
            Self::QuietNightsIn => "quietNightsIn",
            Self::Hiking => "hiking",
            Self::Gaming => "gaming",
            Self::Sports => "sports",
            Self::Comedy => "comedy",
            Self::ArtMuseums => "artMuseums",
            Self::Politics => "politics",
            Self::Science => "science",
            Self::Spirituality => "spirituality",
            Self::Pets => "pets",
            Self::Fashion => "fashion",
            Self::DiyCrafts => "diyCrafts",
            Self::Volunteering => "volunteering",
            Self::BoardGames => "boardGames",
            Self::History => "history",
            Self::Sustainability => "sustainability",
            Self::LiveEvents => "liveEvents",
            Self::PersonalGrowth => "personalGrowth",
            Self::Photography => "photography",
            Self::Gardening => "gardening",
        }
    }

    /// Return the positional slot of this category within [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for InterestCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InterestCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown interest category '{s}'"))
    }
}
