#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use itertools::Itertools;
    use test_case::test_case;

    use ffd::config::FFDConfig;
    use ffd::opt::{PaginationRun, paginate};
    use seampack::entities::{Orientation, PageSpec, PaperSize};
    use seampack::error::{AssemblyError, ErrorKind, PaginationError};
    use seampack::geometry::geo_traits::CollidesWith;
    use seampack::geometry::offset::offset_polygon;
    use seampack::geometry::primitives::{Point, Polygon};
    use seampack::io::assembly::PageAssembler;
    use seampack::io::export::export_solution;
    use seampack::io::ext_repr::{ExtDocument, ExtGroup};
    use seampack::io::import::DocumentImporter;
    use seampack::io::svg::{SvgDrawOptions, SvgPageAssembler};
    use seampack::util::assertions;

    const TOLERANCE: f64 = 0.01;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn rect_path(x: f64, y: f64, w: f64, h: f64) -> String {
        format!("M {x} {y} L {} {y} L {} {} L {x} {} Z", x + w, x + w, y + h, y + h)
    }

    fn group(id: &str, path: String) -> ExtGroup {
        ExtGroup {
            id: Some(id.to_string()),
            outlines: vec![path],
            ..ExtGroup::default()
        }
    }

    /// Document of axis-aligned rectangles (id, x, y, w, h)
    fn rect_document(rects: &[(&str, f64, f64, f64, f64)]) -> ExtDocument {
        ExtDocument {
            scale: 1.0,
            groups: rects
                .iter()
                .map(|&(id, x, y, w, h)| group(id, rect_path(x, y, w, h)))
                .collect(),
        }
    }

    /// Pseudo-random mix of rectangles, triangles and L-shapes, some of them overlapping.
    fn synthetic_document(n: usize) -> ExtDocument {
        let groups = (0..n)
            .map(|i| {
                let w = 20.0 + (i * 37 % 80) as f64;
                let h = 15.0 + (i * 53 % 90) as f64;
                let (x, y) = ((i % 5) as f64 * 70.0, (i / 5) as f64 * 70.0);
                let path = match i % 3 {
                    0 => rect_path(x, y, w, h),
                    1 => format!("M {x} {} L {} {} L {} {y} Z", y + h, x + w, y + h, x + 0.5 * w),
                    _ => format!(
                        "M {x} {y} h {w} v {} h {} v {} h {} Z",
                        0.3 * h,
                        -0.6 * w,
                        0.7 * h,
                        -0.4 * w
                    ),
                };
                group(&format!("piece_{i:02}"), path)
            })
            .collect();
        ExtDocument { scale: 1.0, groups }
    }

    fn a4_config(allowance_mm: f64) -> FFDConfig {
        FFDConfig {
            page: PageSpec::new(PaperSize::A4, Orientation::Portrait),
            allowance_mm,
            ..FFDConfig::default()
        }
    }

    fn run(doc: &ExtDocument, config: &FFDConfig) -> PaginationRun {
        paginate(doc, config).unwrap()
    }

    fn has_vertex_near(p: &Polygon, target: Point) -> bool {
        p.vertices().iter().any(|v| {
            approx_eq!(f64, v.0, target.0, epsilon = TOLERANCE)
                && approx_eq!(f64, v.1, target.1, epsilon = TOLERANCE)
        })
    }

    #[test_case(20.0, 20.0, 80.0, 80.0, 10.0; "square")]
    #[test_case(0.0, 0.0, 190.0, 5.0, 2.5; "thin strip")]
    #[test_case(-40.0, 12.5, 13.25, 99.0, 0.5; "negative coordinates")]
    #[test_case(100.0, 100.0, 100.001, 100.001, 15.0; "tiny rectangle")]
    fn offset_of_rectangle_is_exact(x1: f64, y1: f64, x2: f64, y2: f64, d: f64) {
        let rect = Polygon::new(vec![Point(x1, y1), Point(x2, y1), Point(x2, y2), Point(x1, y2)])
            .unwrap();
        let offset = offset_polygon(&rect, d).unwrap();

        assert_eq!(offset.n_vertices(), 4);
        for corner in [
            Point(x1 - d, y1 - d),
            Point(x2 + d, y1 - d),
            Point(x2 + d, y2 + d),
            Point(x1 - d, y2 + d),
        ] {
            assert!(has_vertex_near(&offset, corner), "{corner:?} missing in {offset:?}");
        }
    }

    #[test_case(1.0, 2.0)]
    #[test_case(2.0, 5.0)]
    #[test_case(0.5, 10.0)]
    fn offset_is_monotonic(d1: f64, d2: f64) {
        let shapes = [
            vec![Point(50.0, 10.0), Point(90.0, 80.0), Point(10.0, 80.0)],
            vec![
                Point(0.0, 0.0),
                Point(60.0, 0.0),
                Point(60.0, 20.0),
                Point(20.0, 20.0),
                Point(20.0, 70.0),
                Point(0.0, 70.0),
            ],
            vec![Point(0.0, 0.0), Point(30.0, 40.0), Point(60.0, 0.0), Point(30.0, 90.0)],
        ];
        for vertices in shapes {
            let polygon = Polygon::new(vertices).unwrap();
            let inner = offset_polygon(&polygon, d1).unwrap();
            let outer = offset_polygon(&polygon, d2).unwrap();
            assert!(inner.vertices().iter().all(|v| outer.collides_with(v)));
        }
    }

    #[test]
    fn zero_offset_is_identity() {
        let polygon = Polygon::new(vec![
            Point(3.3, 1.1),
            Point(70.7, 4.4),
            Point(50.5, 60.6),
            Point(8.8, 40.4),
        ])
        .unwrap();
        assert_eq!(offset_polygon(&polygon, 0.0).unwrap(), polygon);
    }

    #[test_case(0.0; "no allowance")]
    #[test_case(5.0; "5 mm allowance")]
    #[test_case(10.0; "10 mm allowance")]
    fn pagination_invariants(allowance_mm: f64) {
        init_logger();
        let doc = synthetic_document(30);
        let config = a4_config(allowance_mm);
        let run = run(&doc, &config);
        let (w, h) = config.page.printable_area();

        assert!(run.errors().is_empty());
        assert!(assertions::pagination_is_valid(&run.pieces, &run.pagination));

        for page in run.pagination.pages.iter() {
            assert!(!page.is_empty());
            //disjointness of the margin-expanded rectangles
            for (a, b) in page.occupancy.iter().tuple_combinations() {
                assert!(!a.overlaps(b), "{a:?} overlaps {b:?} on page {}", page.index);
            }
            //containment
            for pl in page.placements.iter() {
                let piece = run.pieces.piece(&pl.piece_id).unwrap();
                let fp = pl.footprint(piece);
                assert!(fp.x_min >= 0.0 && fp.y_min >= 0.0);
                assert!(fp.x_max <= w + 1e-9 && fp.y_max <= h + 1e-9);
            }
        }

        //originals separation
        for (a, b) in run.pieces.overlap_pairs.iter() {
            if let (Some(pa), Some(pb)) = (run.pagination.page_of(a), run.pagination.page_of(b)) {
                assert_ne!(pa, pb, "{a} and {b} share a page");
            }
        }

        //completeness
        let mut seen = run
            .pagination
            .placements()
            .map(|(_, pl)| pl.piece_id.clone())
            .chain(run.pagination.unplaced.iter().cloned())
            .collect_vec();
        seen.sort();
        let mut expected = run.pieces.pieces.iter().map(|p| p.id.clone()).collect_vec();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn synthetic_document_has_overlaps() {
        let run = run(&synthetic_document(30), &a4_config(10.0));
        assert!(!run.pieces.overlap_pairs.is_empty());
    }

    #[test_case(0.0)]
    #[test_case(10.0)]
    fn pagination_is_deterministic(allowance_mm: f64) {
        let doc = synthetic_document(25);
        let config = a4_config(allowance_mm);
        let outputs = (0..2)
            .map(|_| {
                let run = run(&doc, &config);
                serde_json::to_string(&export_solution(&run.pagination, run.errors())).unwrap()
            })
            .collect_vec();
        assert_eq!(outputs[0], outputs[1]);
    }

    #[test]
    fn s1_baseline() {
        init_logger();
        let doc = rect_document(&[
            ("a", 0.0, 0.0, 50.0, 50.0),
            ("b", 100.0, 0.0, 50.0, 50.0),
            ("c", 0.0, 100.0, 50.0, 50.0),
        ]);
        let run = run(&doc, &a4_config(0.0));
        let pagination = &run.pagination;

        assert_eq!(pagination.n_pages(), 1);
        assert!(pagination.unplaced.is_empty());
        let page = &pagination.pages[0];
        assert_eq!((page.width, page.height), (190.0, 277.0));
        let positions = page.placements.iter().map(|pl| (pl.dx, pl.dy)).collect_vec();
        assert_eq!(positions, [(0.0, 0.0), (60.0, 0.0), (120.0, 0.0)]);
        for (a, b) in page.occupancy.iter().tuple_combinations() {
            assert!(!a.overlaps(b));
        }
    }

    #[test]
    fn s2_multi_page_by_seam_allowance() {
        init_logger();
        let doc = rect_document(&[
            ("p1", 20.0, 20.0, 60.0, 60.0),
            ("p2", 120.0, 20.0, 60.0, 60.0),
            ("p3", 20.0, 120.0, 60.0, 60.0),
            ("p4", 120.0, 120.0, 60.0, 60.0),
        ]);
        let run = run(&doc, &a4_config(10.0));
        let pagination = &run.pagination;

        assert!(run.pieces.overlap_pairs.is_empty());
        assert!(
            run.pieces
                .pieces
                .iter()
                .all(|p| p.placement_margin(2.0) == 22.0)
        );
        assert_eq!(pagination.n_pages(), 2);
        assert!(pagination.pages.iter().all(|p| p.placements.len() == 2));
        assert!(pagination.unplaced.is_empty());

        let second = &pagination.pages[0].placements[1];
        assert_eq!(second.dx, 0.0);
        assert!(approx_eq!(f64, second.dy, 110.0, epsilon = TOLERANCE));
    }

    #[test]
    fn s3_adjacent_overlap_split() {
        let doc = rect_document(&[("a", 5.0, 5.0, 90.0, 90.0), ("b", 95.0, 5.0, 90.0, 90.0)]);
        let run = run(&doc, &a4_config(10.0));

        assert!(run.pieces.overlap_pairs.contains("a", "b"));
        assert!(run.pieces.pieces.iter().all(|p| p.originally_overlapping));
        let (pa, pb) = (run.pagination.page_of("a"), run.pagination.page_of("b"));
        assert!(pa.is_some() && pb.is_some());
        assert_ne!(pa, pb);
    }

    #[test]
    fn s4_too_large() {
        let doc = rect_document(&[("huge", 0.0, 0.0, 300.0, 400.0)]);
        let run = run(&doc, &a4_config(0.0));

        assert_eq!(run.pagination.n_pages(), 0);
        assert_eq!(run.pagination.unplaced, ["huge"]);

        let assembler = SvgPageAssembler::new(PageSpec::default(), SvgDrawOptions::default());
        match assembler.assemble(&run.pieces.pieces, &run.pagination) {
            Err(AssemblyError::UnplacedPieces { pieces }) => {
                assert_eq!(pieces.len(), 1);
                assert_eq!((pieces[0].width, pieces[0].height), (300.0, 400.0));
            }
            Err(e) => panic!("unexpected error: {e}"),
            Ok(pages) => panic!("assembly should be blocked, got {} pages", pages.len()),
        }
    }

    #[test]
    fn s5_offset_of_triangle() {
        let triangle =
            Polygon::new(vec![Point(50.0, 10.0), Point(90.0, 80.0), Point(10.0, 80.0)]).unwrap();
        let offset = offset_polygon(&triangle, 5.0).unwrap();

        assert!(offset.vertices().iter().any(|v| v.1 < 10.0));
        assert!(offset.vertices().iter().filter(|v| v.1 > 80.0).count() >= 2);
    }

    #[test]
    fn s6_offset_of_square() {
        let square = Polygon::new(vec![
            Point(20.0, 20.0),
            Point(80.0, 20.0),
            Point(80.0, 80.0),
            Point(20.0, 80.0),
        ])
        .unwrap();
        let offset = offset_polygon(&square, 10.0).unwrap();
        for corner in [
            Point(10.0, 10.0),
            Point(90.0, 10.0),
            Point(90.0, 90.0),
            Point(10.0, 90.0),
        ] {
            assert!(has_vertex_near(&offset, corner));
        }
    }

    #[test]
    fn mixed_unplaced_and_placed() {
        let doc = rect_document(&[
            ("huge", 0.0, 0.0, 300.0, 100.0),
            ("small", 400.0, 0.0, 40.0, 40.0),
        ]);
        let run = run(&doc, &a4_config(0.0));
        assert_eq!(run.pagination.n_pages(), 1);
        assert_eq!(run.pagination.unplaced, ["huge"]);
        assert_eq!(run.pagination.page_of("small"), Some(0));
    }

    #[test]
    fn landscape_pages() {
        //250 mm only fits across a landscape sheet
        let doc = rect_document(&[("wide", 0.0, 0.0, 250.0, 100.0)]);
        let portrait = run(&doc, &a4_config(0.0));
        assert_eq!(portrait.pagination.unplaced, ["wide"]);

        let config = FFDConfig {
            page: PageSpec::new(PaperSize::A4, Orientation::Landscape),
            ..FFDConfig::default()
        };
        let landscape = run(&doc, &config);
        assert_eq!(landscape.pagination.n_pages(), 1);
        assert_eq!(landscape.pagination.pages[0].width, 277.0);
    }

    #[test]
    fn no_pieces() {
        let doc = ExtDocument {
            scale: 1.0,
            groups: vec![
                group("line", "M 0 0 L 10 10".to_string()),
                ExtGroup::default(),
            ],
        };
        match paginate(&doc, &a4_config(0.0)) {
            Err(PaginationError::NoPieces { errors }) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].kind, ErrorKind::DegeneratePath);
            }
            other => panic!("expected NoPieces, got {other:?}"),
        }
        assert!(matches!(
            paginate(&ExtDocument::default(), &a4_config(0.0)),
            Err(PaginationError::NoPieces { .. })
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let doc = rect_document(&[("a", 0.0, 0.0, 50.0, 50.0)]);
        let config = FFDConfig {
            coarse_step: 0.0,
            ..a4_config(0.0)
        };
        assert!(matches!(
            paginate(&doc, &config),
            Err(PaginationError::InvalidConfig(_))
        ));
        let config = FFDConfig {
            allowance_mm: f64::NAN,
            ..a4_config(0.0)
        };
        assert!(matches!(
            paginate(&doc, &config),
            Err(PaginationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn svg_document_end_to_end() {
        init_logger();
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
  <g id="front"><path class="seam" d="M 0 0 h 120 v 150 h -120 z"/><text>Front</text></g>
  <g id="back"><path class="seam" d="M 130 0 h 120 v 150 h -120 z"/></g>
  <g id="pocket"><path class="seam" d="M 10 10 h 30 v 30 h -30 z"/></g>
  <g id="broken"><path class="seam" d="M 0 0 L 1 1"/></g>
</svg>"#;
        let config = a4_config(5.0);
        let importer = DocumentImporter::new(&config.outline_class, 1.0).unwrap();
        let doc = importer.import_svg(svg).unwrap();
        let run = run(&doc, &config);

        assert_eq!(run.pieces.len(), 3);
        assert_eq!(run.errors().len(), 1);
        //pocket lies within front
        assert!(run.pieces.overlap_pairs.contains("front", "pocket"));
        assert_ne!(run.pagination.page_of("front"), run.pagination.page_of("pocket"));

        let assembler = SvgPageAssembler::new(config.page, config.svg_draw_options);
        let pages = assembler
            .assemble(&run.pieces.pieces, &run.pagination)
            .unwrap();
        assert_eq!(pages.len(), run.pagination.n_pages());
    }
}
