mod page_to_svg;
mod svg_util;

#[doc(inline)]
pub use page_to_svg::SvgPageAssembler;

#[doc(inline)]
pub use svg_util::Color;
#[doc(inline)]
pub use svg_util::SvgDrawOptions;
#[doc(inline)]
pub use svg_util::SvgPageTheme;
