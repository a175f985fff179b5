pub mod hit;
pub mod paint;

pub use hit::{NodeMetrics, hit_test};
pub use paint::{DrawCmd, DrawList, PaintContext, build_draw_list};
