pub mod primitives;
pub mod scale;
pub mod series_math;
pub mod time_scale;
pub mod types;
pub mod value_scale;

pub use scale::LinearScale;
pub use series_math::{
    SeriesValue, bisect_left, cumsum, element_sum, extract_diff, last, max_index,
};
pub use time_scale::{MonthTick, TimeScale};
pub use types::{Datum, Viewport};
pub use value_scale::{ScaleYType, ValueScale};
