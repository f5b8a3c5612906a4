pub mod app_config;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fields;
pub mod form;
pub mod image_host;
pub mod preview;
pub mod record;
pub mod sizes;

pub use app_config::{AppConfig, Environment};
pub use catalog::{gallery, ProductList, Thumbnail};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_API_BASE_URL};
pub use error::{ConfigError, FormError, PreviewError};
pub use fields::{split_multi_value, Category, MultiValueField, NumericField, TextField};
pub use form::{
    FormMode, ImageAttachment, PreviewUrl, ProductDraft, ProductForm, SubmissionPayload,
    IMAGE_PART_NAME, REMOVED_IMAGES_PART_NAME,
};
pub use image_host::{ImageHost, DEFAULT_IMAGE_HOST};
pub use preview::{BlobRegistry, EphemeralHandle, LocalFile, PreviewProvider, EPHEMERAL_SCHEME};
pub use record::ProductRecord;
pub use sizes::{SizeRegion, SizeVariantSet, INDIA_SIZES, PAKISTAN_SIZES};
