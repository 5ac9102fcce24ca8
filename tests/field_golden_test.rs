use julia_field::{
    Complex, Escape, Field, FieldConfig, Palette, classify, julia_constant, map_cell,
    render_still, step,
};

#[test]
fn orbit_of_origin_at_rest_matches_reference_trace() {
    let expected = [
        (-0.7, 0.32015),
        (-0.3124960225, -0.12805999999999995),
        (-0.6187455995216794, 0.40018648128269996),
        (-0.47730310287398625, -0.17507724856347107),
        (-0.5028337909514202, 0.48727982796396974),
    ];
    let mut z = Complex::ZERO;
    for (i, (re, im)) in expected.into_iter().enumerate() {
        z = step(z, 0.0);
        assert_eq!(z.re.to_bits(), f64::to_bits(re), "re after step {}", i + 1);
        assert_eq!(z.im.to_bits(), f64::to_bits(im), "im after step {}", i + 1);
        assert!(z.norm() < 2.0);
    }
}

#[test]
fn constant_at_rest_includes_cosine_term() {
    let c = julia_constant(0.0);
    assert_eq!(c, Complex::new(-0.7, 0.32015));
}

#[test]
fn ten_by_ten_end_to_end() {
    assert_eq!(map_cell(5, 5, 10, 10, 0.0), Complex::ZERO);
    assert_eq!(classify(Complex::ZERO, 0.0), Escape::After(18));
    assert_eq!(classify(map_cell(0, 0, 10, 10, 0.0), 0.0), Escape::After(0));
    assert_eq!(classify(map_cell(2, 5, 10, 10, 0.0), 0.0), Escape::After(2));
    assert_eq!(classify(map_cell(7, 3, 10, 10, 0.0), 0.0), Escape::After(2));

    let text = render_still(10, 10, 0.0).unwrap();
    let rows: Vec<&str> = text.split('\n').collect();
    assert_eq!(
        rows,
        vec![
            "          ",
            "          ",
            "          ",
            "          ",
            "     █░█  ",
            "   ·█▒█·  ",
            "   █░█    ",
            "          ",
            "          ",
            "          ",
        ]
    );
}

#[test]
fn default_grid_at_rest() {
    let mut field = Field::new(&FieldConfig::default());
    let stats = field.render(0.0).unwrap();
    assert_eq!(stats.converged, 202);
    assert_eq!(stats.escaped, 80 * 40 - 202);
    assert_eq!(field.grid().count('█'), 258);
    assert_eq!(field.grid().count(' '), 2657);
    let middle: String = field.grid().row(20).iter().collect();
    assert_eq!(
        middle,
        "               ░······░░██████████████▓▒▒▒▓██████████████░░······░              "
    );
}

#[test]
fn tiny_grid_degrades_to_blank() {
    assert_eq!(render_still(3, 2, 0.0).unwrap(), "   \n   ");
}

#[test]
fn every_cell_is_a_palette_symbol() {
    let palette = Palette::default();
    let mut field = Field::new(&FieldConfig::default());
    for frame in 0..10 {
        field.render(f64::from(frame) * 0.2).unwrap();
        for row in field.grid().rows() {
            for c in row {
                assert!(palette.symbols().contains(c));
            }
        }
    }
}

#[test]
fn other_palettes_keep_the_same_geometry() {
    let cfg = FieldConfig::builder(10, 10)
        .palette(Palette::from_name("ascii").unwrap())
        .build()
        .unwrap();
    let mut field = Field::new(&cfg);
    field.render(0.0).unwrap();
    let rows = field.grid().lines();
    assert_eq!(rows[5], "   .@+@.  ");
}
