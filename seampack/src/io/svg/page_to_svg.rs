use log::debug;
use svg::Document;
use svg::node::element::{Group, Rectangle, Text, Title};

use crate::entities::{PRINT_MARGIN, Page, PageSpec, PatternPiece};
use crate::error::AssemblyError;
use crate::geometry::geo_traits::Translatable;
use crate::io::assembly::{PageAssembler, find_piece};
use crate::io::svg::svg_util::{SvgDrawOptions, data_to_path, polygon_data, rect_data};

/// Renders every page as an SVG document sized to the physical sheet.
#[derive(Clone, Debug)]
pub struct SvgPageAssembler {
    pub page_spec: PageSpec,
    pub options: SvgDrawOptions,
}

impl SvgPageAssembler {
    pub fn new(page_spec: PageSpec, options: SvgDrawOptions) -> Self {
        SvgPageAssembler { page_spec, options }
    }

    fn piece_group(&self, piece: &PatternPiece, translation: (f64, f64)) -> Group {
        let theme = &self.options.theme;
        let sw = theme.stroke_width;
        let (tx, ty) = translation;

        let mut group = Group::new()
            .set("id", format!("piece_{}", piece.id))
            .add(Title::new(format!(
                "piece {}, bbox: {:.1} x {:.1} mm",
                piece.id,
                piece.bbox.width(),
                piece.bbox.height()
            )));

        //cut line
        if let Some(allowance) = &piece.allowance {
            group = group.add(data_to_path(
                polygon_data(&allowance.shape.translate_clone(tx, ty)),
                &[
                    ("fill", &*theme.piece_fill.to_string()),
                    ("stroke", &*theme.cut_stroke.to_string()),
                    ("stroke-width", &*format!("{sw}")),
                ],
            ));
        }

        //sewing line, dashed when a separate cut line is drawn
        let seam_style = match piece.has_allowance() {
            true => vec![
                ("fill", "none".to_string()),
                ("stroke", theme.seam_stroke.to_string()),
                ("stroke-width", format!("{}", 0.5 * sw)),
                ("stroke-dasharray", format!("{} {}", 8.0 * sw, 4.0 * sw)),
            ],
            false => vec![
                ("fill", theme.piece_fill.to_string()),
                ("stroke", theme.cut_stroke.to_string()),
                ("stroke-width", format!("{sw}")),
            ],
        };
        let seam_style = seam_style.iter().map(|(k, v)| (*k, v.as_str())).collect::<Vec<_>>();
        group = group.add(data_to_path(
            polygon_data(&piece.outline.translate_clone(tx, ty)),
            &seam_style,
        ));

        //guides are kept in document coordinates and placed with a transform
        if !piece.auxiliary.guides.is_empty() {
            let mut guides = Group::new()
                .set(
                    "transform",
                    format!(
                        "translate({tx:.3} {ty:.3}) scale({})",
                        piece.auxiliary.scale
                    ),
                )
                .set("fill", "none")
                .set("stroke", theme.guide_stroke.to_string())
                .set("stroke-width", 0.5 * sw / piece.auxiliary.scale);
            for d in piece.auxiliary.guides.iter() {
                guides = guides.add(svg::node::element::Path::new().set("d", d.as_str()));
            }
            group = group.add(guides);
        }

        //labels and id stacked around the center of the placed bbox
        let bbox = piece.bbox;
        let (cx, cy) = (
            bbox.x_min + tx + 0.5 * bbox.width(),
            bbox.y_min + ty + 0.5 * bbox.height(),
        );
        let mut lines = piece.auxiliary.labels.clone();
        if self.options.draw_piece_ids {
            lines.push(piece.id.clone());
        }
        let line_height = 1.2 * theme.font_size;
        let y_start = cy - 0.5 * line_height * (lines.len() as f64 - 1.0);
        for (i, line) in lines.into_iter().enumerate() {
            group = group.add(
                Text::new(line)
                    .set("x", cx)
                    .set("y", y_start + i as f64 * line_height)
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "middle")
                    .set("font-size", theme.font_size)
                    .set("fill", theme.label_fill.to_string()),
            );
        }

        if !piece.auxiliary.textures.is_empty() {
            group = group.set("data-textures", piece.auxiliary.textures.join(" "));
        }
        group
    }
}

impl PageAssembler for SvgPageAssembler {
    type Output = Document;

    fn assemble_page(
        &self,
        page: &Page,
        pieces: &[PatternPiece],
    ) -> Result<Document, AssemblyError> {
        let (sheet_w, sheet_h) = self.page_spec.sheet_size();
        let theme = &self.options.theme;

        let mut printable = Group::new()
            .set("id", "printable_area")
            .set("transform", format!("translate({PRINT_MARGIN} {PRINT_MARGIN})"));

        if self.options.draw_printable_area {
            printable = printable.add(
                Rectangle::new()
                    .set("width", page.width)
                    .set("height", page.height)
                    .set("fill", "none")
                    .set("stroke", theme.guide_stroke.to_string())
                    .set("stroke-width", 0.25 * theme.stroke_width)
                    .set("stroke-opacity", 0.5),
            );
        }

        if self.options.draw_occupancy {
            let mut occupancy = Group::new().set("id", "occupancy");
            for rect in page.occupancy.iter() {
                occupancy = occupancy.add(data_to_path(
                    rect_data(rect),
                    &[
                        ("fill", &*theme.occupancy_fill.to_string()),
                        ("fill-opacity", "0.25"),
                        ("stroke", "none"),
                    ],
                ));
            }
            printable = printable.add(occupancy);
        }

        for placement in page.placements.iter() {
            let piece = find_piece(pieces, &placement.piece_id)
                .ok_or_else(|| AssemblyError::UnknownPiece(placement.piece_id.clone()))?;
            printable = printable.add(self.piece_group(piece, placement.translation(piece)));
        }

        debug!(
            "[SVG] page {} rendered with {} pieces",
            page.index,
            page.placements.len()
        );

        Ok(Document::new()
            .set("viewBox", (0.0, 0.0, sheet_w, sheet_h))
            .set("width", format!("{sheet_w}mm"))
            .set("height", format!("{sheet_h}mm"))
            .add(Title::new(format!(
                "page {} ({}, {:?})",
                page.index, self.page_spec.paper, self.page_spec.orientation
            )))
            .add(printable))
    }
}
