pub mod category;
pub mod config;
pub mod error;
pub mod guide;
pub mod identify;

pub use config::{resolve_base_dir, Config, OutputConfig, OutputFormat};
pub use error::{PlantGuideError, Result};
pub use guide::{categorize, clean_line, Bullet, CategorizedGuide, Categorizer, GuideSection};
pub use identify::{
    guide_prompt, parse_response, Digest, GeminiResponse, PlantIdResponse, PlantIdentity,
    PlantNetResponse,
};

// Category system
pub use category::{
    BuiltinCategory, CategoriesConfig, CategoryConfigEntry, CategoryDef, CategoryStore,
    LineClassifier, BUILTIN_CATEGORIES,
};
