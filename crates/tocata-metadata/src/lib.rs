mod lofty_probe;

pub use lofty_probe::LoftyProbe;
