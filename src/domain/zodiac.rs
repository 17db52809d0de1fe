use strum::{EnumCount, EnumIter, EnumString, IntoStaticStr};

/// One of the twelve zodiac signs. Declaration order is the order rows are
/// emitted in, so do not reorder the variants.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    EnumCount,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Subject {
    Rat,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Sheep,
    Monkey,
    Rooster,
    Dog,
    Pig,
}

impl Subject {
    /// Identifier stored in the `subject_id` column.
    ///
    /// ```
    /// use daily_fortune::domain::zodiac::Subject;
    /// assert_eq!(Subject::Rooster.id(), "rooster");
    /// ```
    pub fn id(self) -> &'static str {
        self.into()
    }

    pub fn label(self) -> &'static str {
        match self {
            Subject::Rat => "쥐띠",
            Subject::Ox => "소띠",
            Subject::Tiger => "호랑이띠",
            Subject::Rabbit => "토끼띠",
            Subject::Dragon => "용띠",
            Subject::Snake => "뱀띠",
            Subject::Horse => "말띠",
            Subject::Sheep => "양띠",
            Subject::Monkey => "원숭이띠",
            Subject::Rooster => "닭띠",
            Subject::Dog => "개띠",
            Subject::Pig => "돼지띠",
        }
    }
}

/// Life domain a fortune is written for. Declaration order is row order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    EnumCount,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    Overall,
    Money,
    Work,
    Health,
    Relationship,
}

impl Category {
    /// Identifier stored in the `category_id` column.
    ///
    /// ```
    /// use daily_fortune::domain::zodiac::Category;
    /// assert_eq!(Category::Relationship.id(), "relationship");
    /// ```
    pub fn id(self) -> &'static str {
        self.into()
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Overall => "종합운",
            Category::Money => "재물운",
            Category::Work => "직장/사업운",
            Category::Health => "가정/건강운",
            Category::Relationship => "이성/대인관계",
        }
    }
}
