//! Rasterisation benchmark: Draw a full overlay frame and diff it.
//!
//! Target: < 500µs per 200×50 frame including the diff.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quavatar::app::{App, OverlayConfig};
use quavatar::render::diff::{render_diff, render_full, DiffState};
use quavatar::render::{Canvas, CellGrid, Rgb};
use quavatar::widget::AvatarTextures;
use quavatar::{Rect, Session};

fn app() -> App {
    let textures = AvatarTextures::builtin(Rgb::WHITE).unwrap();
    App::new(Session::default(), textures, OverlayConfig::default())
}

fn raster_overlay_frame(c: &mut Criterion) {
    let mut app = app();
    let mut grid = CellGrid::new(200, 50);
    let area = grid.bounds();

    c.bench_function("raster_overlay_200x50", |b| {
        b.iter(|| {
            grid.clear(Rgb::BLACK);
            app.render(black_box(&mut grid), area).unwrap()
        });
    });
}

fn raster_primitives(c: &mut Criterion) {
    let mut grid = CellGrid::new(200, 50);
    c.bench_function("raster_fill_rect_full", |b| {
        b.iter(|| grid.fill_rect(black_box(Rect::new(0, 0, 200, 50)), Rgb::PURE_GREEN));
    });

    let textures = AvatarTextures::builtin(Rgb::WHITE).unwrap();
    c.bench_function("raster_texture_scale_2", |b| {
        b.iter(|| grid.draw_texture(&textures.idle, black_box(quavatar::layout::Point::new(10, 5)), 2.0));
    });
}

fn diff_overlay_frames(c: &mut Criterion) {
    let mut app = app();
    let area = Rect::new(0, 0, 200, 50);
    let mut previous = CellGrid::new(200, 50);
    app.render(&mut previous, area).unwrap();
    let mut next = previous.clone();
    app.session().level().publish(1.0);
    app.render(&mut next, area).unwrap();

    c.bench_function("diff_overlay_level_change", |b| {
        let mut output = Vec::with_capacity(65536);
        b.iter(|| {
            output.clear();
            let mut state = DiffState::new();
            render_diff(black_box(&previous), black_box(&next), &mut output, &mut state)
        });
    });

    c.bench_function("full_redraw_200x50", |b| {
        let mut output = Vec::with_capacity(65536);
        b.iter(|| {
            output.clear();
            render_full(black_box(&next), &mut output);
        });
    });
}

criterion_group!(benches, raster_overlay_frame, raster_primitives, diff_overlay_frames);
criterion_main!(benches);
