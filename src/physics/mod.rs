pub mod bessel;
pub mod material;
pub mod modes;
pub mod rational;
pub mod transfer;
