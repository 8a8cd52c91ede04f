pub mod array_dataset;
pub mod eval_dataset;
pub mod image_folder;
pub mod traits;

pub use array_dataset::ArrayDataset;
pub use eval_dataset::EvalDataset;
pub use image_folder::ImageFolder;
pub use traits::{Dataset, Subsettable};
