//! Configuration module

mod site;

pub use site::ConverterConfig;
pub use site::ConverterKind;
pub use site::DefaultsConfig;
pub use site::ImageProbeConfig;
pub use site::ImageProbeKind;
pub use site::SiteConfig;
