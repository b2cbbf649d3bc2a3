#![forbid(unsafe_code)]

pub mod capture;
pub mod logbook;
pub mod query;
pub mod tags;
pub mod timeline;

pub mod model {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub enum TagType {
        AutoDate,
        AutoLanguage,
        Custom,
    }

    impl TagType {
        pub fn as_str(self) -> &'static str {
            match self {
                TagType::AutoDate => "auto_date",
                TagType::AutoLanguage => "auto_language",
                TagType::Custom => "custom",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            match value.trim() {
                "auto_date" => Some(Self::AutoDate),
                "auto_language" => Some(Self::AutoLanguage),
                "custom" => Some(Self::Custom),
                _ => None,
            }
        }
    }

    /// A unique `(original_text, source_language)` vocabulary entry.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Word {
        pub id: i64,
        pub original_text: String,
        pub source_language: String,
        pub created_at_ms: i64,
        pub updated_at_ms: i64,
    }

    /// Provider payload for one translation, before it is persisted.
    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    pub struct TranslationData {
        pub translation: String,
        pub definition: Option<String>,
        pub pronunciation: Option<String>,
        pub part_of_speech: Option<String>,
        pub examples: Vec<String>,
        pub usage_notes: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Translation {
        pub id: i64,
        pub word_id: i64,
        pub target_language: String,
        pub translation: String,
        pub definition: Option<String>,
        pub pronunciation: Option<String>,
        pub part_of_speech: Option<String>,
        pub examples: Vec<String>,
        pub usage_notes: Option<String>,
        pub created_at_ms: i64,
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Tag {
        pub id: i64,
        pub word_id: i64,
        pub tag_name: String,
        pub tag_type: TagType,
        pub created_at_ms: i64,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct NewTag {
        pub name: String,
        pub tag_type: TagType,
    }

    impl NewTag {
        pub fn new(name: impl Into<String>, tag_type: TagType) -> Self {
            Self {
                name: name.into(),
                tag_type,
            }
        }
    }

    /// One distinct `(name, type)` pair with the number of words carrying it.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct TagUsage {
        pub name: String,
        pub tag_type: TagType,
        pub count: i64,
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct WordWithTranslations {
        pub word: Word,
        pub translations: Vec<Translation>,
        pub tags: Vec<Tag>,
    }
}
