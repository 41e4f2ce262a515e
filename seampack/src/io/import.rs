use anyhow::{Context, Result, ensure};
use itertools::Itertools;
use log::{debug, info};
use roxmltree::Node;

use crate::io::ext_repr::{ExtDocument, ExtGroup};

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Converts pattern documents (SVG or JSON) into an [`ExtDocument`].
#[derive(Clone, Debug)]
pub struct DocumentImporter {
    /// Value of the `class` attribute which tags a `<path>` as a sewing outline
    pub outline_class: String,
    /// Uniform scale factor applied to all coordinates of the document
    pub scale: f64,
}

impl DocumentImporter {
    pub fn new(outline_class: impl Into<String>, scale: f64) -> Result<Self> {
        ensure!(
            scale > 0.0 && scale.is_finite(),
            "scale factor must be positive, got {scale}"
        );
        Ok(DocumentImporter {
            outline_class: outline_class.into(),
            scale,
        })
    }

    /// Every `<g>` element is a group. Within a group, only direct children are considered:
    /// `<path>` elements carrying the outline class are outlines, other `<path>` elements are guides,
    /// `<text>` contents are labels and `<image>` hrefs are texture references.
    /// Transform attributes are not interpreted.
    pub fn import_svg(&self, svg: &str) -> Result<ExtDocument> {
        let xml = roxmltree::Document::parse(svg).context("could not parse svg document")?;

        let groups = xml
            .descendants()
            .filter(|n| n.has_tag_name("g"))
            .map(|g| self.import_group(g))
            .collect_vec();

        info!(
            "[IMPORT] svg document parsed: {} groups, {} with outline",
            groups.len(),
            groups.iter().filter(|g| !g.outlines.is_empty()).count()
        );

        Ok(ExtDocument {
            scale: self.scale,
            groups,
        })
    }

    /// Parses an [`ExtDocument`] serialized as JSON. The scale factor of the document is
    /// multiplied with the one of the importer.
    pub fn import_json(&self, json: &str) -> Result<ExtDocument> {
        let mut doc: ExtDocument =
            serde_json::from_str(json).context("could not parse json document")?;
        ensure!(
            doc.scale > 0.0 && doc.scale.is_finite(),
            "document scale factor must be positive, got {}",
            doc.scale
        );
        doc.scale *= self.scale;
        info!("[IMPORT] json document parsed: {} groups", doc.groups.len());
        Ok(doc)
    }

    fn import_group(&self, g: Node) -> ExtGroup {
        let mut group = ExtGroup {
            id: g.attribute("id").map(String::from),
            ..ExtGroup::default()
        };

        for child in g.children().filter(|c| c.is_element()) {
            match child.tag_name().name() {
                "path" => {
                    let Some(d) = child.attribute("d") else {
                        debug!("[IMPORT] <path> without data in group {:?}", group.id);
                        continue;
                    };
                    match self.is_outline(child) {
                        true => group.outlines.push(d.to_string()),
                        false => group.guides.push(d.to_string()),
                    }
                }
                "text" => {
                    let label: String = child
                        .descendants()
                        .filter(|n| n.is_text())
                        .filter_map(|n| n.text())
                        .collect();
                    let label = label.trim();
                    if !label.is_empty() {
                        group.labels.push(label.to_string());
                    }
                }
                "image" => {
                    if let Some(href) = child
                        .attribute("href")
                        .or_else(|| child.attribute((XLINK_NS, "href")))
                    {
                        group.textures.push(href.to_string());
                    }
                }
                _ => {}
            }
        }
        group
    }

    fn is_outline(&self, node: Node) -> bool {
        node.attribute("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == self.outline_class))
    }
}
