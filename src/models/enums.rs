use serde::{Deserialize, Serialize};

/// Declares an enum whose variants map to the numeric values used by Tibia.com forms.
macro_rules! numeric_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident = $value:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $name {
            /// The value used in query strings and form fields.
            pub fn value(self) -> i32 {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            pub fn from_value(value: i32) -> Option<Self> {
                match value {
                    $(v if v == $value => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

numeric_enum! {
    /// PvP types of the worlds to show auctions for.
    PvpTypeFilter {
        OpenPvp = 0,
        OptionalPvp = 1,
        HardcorePvp = 2,
        RetroOpenPvp = 3,
        RetroHardcorePvp = 4,
    }
}

numeric_enum! {
    /// BattlEye protection of the worlds to show auctions for.
    AuctionBattlEyeFilter {
        /// Protected since the world was created (green symbol).
        InitiallyProtected = 1,
        /// Protected after the world was created (yellow symbol).
        Protected = 2,
        NotProtected = 3,
    }
}

numeric_enum! {
    AuctionVocationFilter {
        None = 1,
        Druid = 2,
        Knight = 3,
        Paladin = 4,
        Sorcerer = 5,
    }
}

numeric_enum! {
    AuctionSkillFilter {
        MagicLevel = 1,
        Shielding = 6,
        DistanceFighting = 7,
        SwordFighting = 8,
        ClubFighting = 9,
        AxeFighting = 10,
        FistFighting = 11,
        Fishing = 13,
    }
}

numeric_enum! {
    /// The column the auctions are sorted by.
    AuctionOrderBy {
        MagicLevel = 1,
        Shielding = 6,
        DistanceFighting = 7,
        SwordFighting = 8,
        ClubFighting = 9,
        AxeFighting = 10,
        FistFighting = 11,
        Fishing = 13,
        Bid = 100,
        EndDate = 101,
        Level = 102,
        StartDate = 103,
    }
}

numeric_enum! {
    AuctionOrderDirection {
        HighestLatest = 0,
        LowestEarliest = 1,
    }
}

numeric_enum! {
    /// How the search string of the bazaar is interpreted.
    AuctionSearchType {
        /// Items including every word of the search string.
        ItemDefault = 0,
        /// Items including the search string.
        ItemWildcard = 1,
        CharacterName = 2,
    }
}

numeric_enum! {
    /// The paginated collections of an auction's detail page.
    ///
    /// The value is the `type` parameter of the continuation page requests.
    SummaryKind {
        Items = 0,
        StoreItems = 1,
        Mounts = 2,
        StoreMounts = 3,
        Outfits = 4,
        StoreOutfits = 5,
        Familiars = 6,
    }
}

impl SummaryKind {
    pub const ALL: [SummaryKind; 7] = [
        Self::Items,
        Self::StoreItems,
        Self::Mounts,
        Self::StoreMounts,
        Self::Outfits,
        Self::StoreOutfits,
        Self::Familiars,
    ];

    /// The id of the detail block holding this collection.
    pub fn block_id(self) -> &'static str {
        match self {
            Self::Items => "ItemSummary",
            Self::StoreItems => "StoreItemSummary",
            Self::Mounts => "Mounts",
            Self::StoreMounts => "StoreMounts",
            Self::Outfits => "Outfits",
            Self::StoreOutfits => "StoreOutfits",
            Self::Familiars => "Familiars",
        }
    }
}

/// The state of an auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuctionStatus {
    /// Ongoing auction. Tibia.com shows no status text for these.
    #[default]
    InProgress,
    /// Finished with a winner, payment not received yet.
    CurrentlyProcessed,
    /// Paid, the character moves to the new owner at the next server save.
    PendingTransfer,
    /// No payment was received in time.
    Cancelled,
    /// Finished with no bids, or already transferred.
    Finished,
}

impl AuctionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in progress",
            Self::CurrentlyProcessed => "currently processed",
            Self::PendingTransfer => "will be transferred at the next server save",
            Self::Cancelled => "cancelled",
            Self::Finished => "finished",
        }
    }

    /// Match a status phrase, ignoring case and repeated whitespace.
    pub fn from_text(text: &str) -> Option<Self> {
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        [
            Self::InProgress,
            Self::CurrentlyProcessed,
            Self::PendingTransfer,
            Self::Cancelled,
            Self::Finished,
        ]
        .into_iter()
        .find(|status| status.as_str() == normalized)
    }
}

/// What the displayed bid of an auction means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidType {
    /// Minimum set by the seller, no bids received.
    Minimum,
    Current,
    Winning,
}

impl BidType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimum => "Minimum Bid",
            Self::Current => "Current Bid",
            Self::Winning => "Winning Bid",
        }
    }

    /// Match a bid label such as `Minimum Bid:`.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.to_lowercase();
        if label.contains("minimum") {
            Some(Self::Minimum)
        } else if label.contains("current") {
            Some(Self::Current)
        } else if label.contains("winning") {
            Some(Self::Winning)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BazaarType {
    Current,
    History,
}

impl BazaarType {
    /// The `subtopic` query value of this section.
    pub fn subtopic(self) -> &'static str {
        match self {
            Self::Current => "currentcharactertrades",
            Self::History => "pastcharactertrades",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn from_text(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vocation {
    None,
    Druid,
    Knight,
    Paladin,
    Sorcerer,
    ElderDruid,
    EliteKnight,
    RoyalPaladin,
    MasterSorcerer,
}

impl Vocation {
    const ALL: [Vocation; 9] = [
        Self::None,
        Self::Druid,
        Self::Knight,
        Self::Paladin,
        Self::Sorcerer,
        Self::ElderDruid,
        Self::EliteKnight,
        Self::RoyalPaladin,
        Self::MasterSorcerer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Druid => "Druid",
            Self::Knight => "Knight",
            Self::Paladin => "Paladin",
            Self::Sorcerer => "Sorcerer",
            Self::ElderDruid => "Elder Druid",
            Self::EliteKnight => "Elite Knight",
            Self::RoyalPaladin => "Royal Paladin",
            Self::MasterSorcerer => "Master Sorcerer",
        }
    }

    pub fn from_text(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL
            .into_iter()
            .find(|vocation| vocation.as_str().eq_ignore_ascii_case(text))
    }

    /// The vocation before promotion.
    pub fn base(self) -> Self {
        match self {
            Self::ElderDruid => Self::Druid,
            Self::EliteKnight => Self::Knight,
            Self::RoyalPaladin => Self::Paladin,
            Self::MasterSorcerer => Self::Sorcerer,
            other => other,
        }
    }
}
