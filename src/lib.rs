pub mod convert;
pub mod logger;
pub mod settings;

pub use self::convert::{ convert, convert_all, error_chain, output_path, BatchOutcome, ConversionReport, ConvertError };
pub use self::settings::{ Settings, SettingsError };
