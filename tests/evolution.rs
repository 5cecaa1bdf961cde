use pixel_evolver::archive::{Discard, ImageDirectory};
use pixel_evolver::picture::Picture;
use pixel_evolver::raster::ColorMatrix;
use pixel_evolver::{Evolver, EvolverConfig};
use std::collections::HashSet;

fn black_target() -> ColorMatrix {
    ColorMatrix::filled(4, [0, 0, 0])
}

#[test]
fn best_score_never_increases() {
    for seed in 0..5 {
        let config = EvolverConfig {
            survival_size: 2,
            seed: Some(seed),
            ..Default::default()
        };
        assert_eq!(config.population_size(), 10);
        let mut evo = Evolver::new(black_target(), config).unwrap();
        let mut scores = Vec::new();
        for _ in 0..20 {
            scores.push(evo.step(5, &mut Discard).unwrap());
            assert_eq!(evo.population().len(), 10);
        }
        for pair in scores.windows(2) {
            assert!(pair[1] <= pair[0], "seed {seed}: {scores:?}");
        }
        let history: Vec<u64> = evo.history().iter().map(|&(_, score)| score).collect();
        assert_eq!(history, scores);
    }
}

#[test]
fn survivors_carry_over_unchanged() {
    let config = EvolverConfig {
        survival_size: 3,
        seed: Some(11),
        ..Default::default()
    };
    let mut evo = Evolver::new(black_target(), config).unwrap();
    for _ in 0..20 {
        let before: Vec<Picture> = evo.population().to_vec();
        evo.step(1, &mut Discard).unwrap();
        assert_eq!(evo.population().len(), 21);
        let ids: HashSet<&str> = evo.population().iter().map(Picture::id).collect();
        assert_eq!(ids.len(), 21);
        for survivor in &evo.population()[..3] {
            let old = before.iter().find(|old| old.id() == survivor.id());
            assert_eq!(old, Some(survivor));
        }
        for child in &evo.population()[3..] {
            assert!(before.iter().all(|old| old.id() != child.id()));
        }
    }
}

#[test]
fn command_line_run_writes_artifacts() {
    let mut dir = std::env::temp_dir();
    dir.push(format!("pixel_evolver_e2e_{}", std::process::id()));
    let target_path = dir.join("target.png");
    std::fs::create_dir_all(&dir).unwrap();
    ColorMatrix::filled(10, [200, 30, 30]).save_png(&target_path).unwrap();

    let config = EvolverConfig {
        seed: Some(3),
        output_dir: dir.join("out"),
        ..Default::default()
    };
    let mut evo = Evolver::open(&target_path, config).unwrap();
    assert_eq!(evo.grid_size(), 10);
    let mut archive = ImageDirectory::new(dir.join("out"));
    evo.run(4, 2, &mut archive).unwrap();
    evo.save_history(dir.join("out").join("history.txt")).unwrap();

    for picture in &evo.population()[..2] {
        let image = ColorMatrix::load(archive.file_for(picture.id())).unwrap();
        assert_eq!(image.side(), 10);
    }
    let history = std::fs::read_to_string(dir.join("out").join("history.txt")).unwrap();
    assert_eq!(history.lines().count(), 5);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn non_square_target_fails_to_open() {
    let mut path = std::env::temp_dir();
    path.push(format!("pixel_evolver_wide_{}.png", std::process::id()));
    image::RgbImage::new(6, 4).save(&path).unwrap();
    let err = Evolver::open(&path, EvolverConfig::default()).err().unwrap();
    assert!(err.is_configuration());
    std::fs::remove_file(&path).unwrap();
}
