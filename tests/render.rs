use trend_plot::{
    AnsiCode, BraillePlotter, CentralStat, ErrorStat, TrendConfig, TrendError, trendplot_with,
};

fn noisy_parabola() -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (0..300).map(|i| f64::from(i) / 30.0).collect();
    let y: Vec<f64> = x
        .iter()
        .enumerate()
        .map(|(i, v)| (v - 5.0).powi(2) + if i % 2 == 0 { 0.7 } else { -0.7 })
        .collect();
    (x, y)
}

fn braille_cells(text: &str) -> usize {
    text.chars()
        .filter(|c| ('\u{2801}'..='\u{28FF}').contains(c))
        .count()
}

#[test]
fn full_chart_is_written_to_any_writer() {
    let (x, y) = noisy_parabola();
    let cfg = TrendConfig::builder()
        .title("parabola")
        .ystat(CentralStat::BiweightMean)
        .estat(ErrorStat::Sem)
        .sigfact(1.0)
        .ccolor(AnsiCode::cyan())
        .build()
        .unwrap();
    let mut plotter = BraillePlotter::new(Vec::new(), cfg.title.as_str()).size(60, 16);
    let curve = trendplot_with(&mut plotter, &x, &y, &cfg).unwrap();
    assert_eq!(curve.len(), 10);

    let text = String::from_utf8(plotter.into_inner()).unwrap();
    assert_eq!(text.lines().count(), 16 + 4);
    assert!(text.contains("parabola"));
    assert!(text.contains(AnsiCode::cyan().as_str()));
    assert!(text.contains(cfg.sigcolor.as_str()));
    assert!(braille_cells(&text) > 60);
}

#[test]
fn noplot_leaves_the_plotter_untouched() {
    let (x, y) = noisy_parabola();
    let cfg = TrendConfig::builder().noplot(true).build().unwrap();
    let mut plotter = BraillePlotter::new(Vec::new(), "quiet").size(30, 10);
    let curve = trendplot_with(&mut plotter, &x, &y, &cfg).unwrap();
    assert!(!curve.is_empty());
    assert!(plotter.into_inner().is_empty());
}

#[test]
fn noscatter_draws_fewer_dots() {
    let (x, y) = noisy_parabola();
    let render = |noscatter| {
        let cfg = TrendConfig::builder()
            .noscatter(noscatter)
            .error_bars(false)
            .build()
            .unwrap();
        let mut plotter = BraillePlotter::new(Vec::new(), "t").size(40, 12);
        trendplot_with(&mut plotter, &x, &y, &cfg).unwrap();
        String::from_utf8(plotter.into_inner()).unwrap()
    };
    let with = render(false);
    let without = render(true);
    assert!(with.contains(AnsiCode::grey().as_str()));
    assert!(!without.contains(AnsiCode::grey().as_str()));
    assert!(braille_cells(&with) > braille_cells(&without));
}

#[test]
fn undersized_chart_fails_cleanly() {
    let (x, y) = noisy_parabola();
    let mut plotter = BraillePlotter::new(Vec::new(), "tiny").size(5, 3);
    let err = trendplot_with(&mut plotter, &x, &y, &TrendConfig::default()).unwrap_err();
    assert!(matches!(err, TrendError::GraphTooSmall { got_w: 5, got_h: 3, .. }));
}

#[test]
fn zero_sized_chart_fails_cleanly() {
    let (x, y) = noisy_parabola();
    for (w, h) in [(0, 10), (30, 0), (0, 0)] {
        let mut plotter = BraillePlotter::new(Vec::new(), "empty").size(w, h);
        let err = trendplot_with(&mut plotter, &x, &y, &TrendConfig::default()).unwrap_err();
        assert!(matches!(err, TrendError::GraphTooSmall { got_w, got_h, .. } if got_w == w && got_h == h));
        assert!(plotter.into_inner().is_empty());
    }
}
