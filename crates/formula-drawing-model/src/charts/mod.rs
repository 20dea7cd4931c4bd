mod formatting;
mod model;

pub use formatting::{FillStyle, LineStyle, ShapeStyle, SolidFill};
pub use model::{ChartSpace, DisplayBlanksAs};
