mod view;

pub use view::IrLogDetails;
