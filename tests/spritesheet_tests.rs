//! Integration tests for spritesheets built from preloaded textures
//!
//! Exercises the public API end to end: textures loaded from disk into an
//! asset store, sheets resolved by name, cells cropped back out as images.

use image::{Rgba, RgbaImage};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

use spritegrid::{
    AssetStore, BoundsPolicy, Rect, Renderable, SheetError, Spritesheet, Texture, TextureProvider,
};

/// Write a 40x30 texture where every 10x10 cell is filled with a color
/// encoding its index in the red channel.
fn write_indexed_grid(dir: &Path, name: &str) {
    let mut image = RgbaImage::new(40, 30);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let index = (y / 10) * 4 + (x / 10);
        *pixel = Rgba([index as u8 * 10, 0, 0, 255]);
    }
    image.save(dir.join(name)).expect("should write grid png");
}

fn load_grid_sheet(temp: &TempDir) -> (AssetStore, Spritesheet) {
    write_indexed_grid(temp.path(), "grid.png");
    let mut store = AssetStore::new();
    store.add(&temp.path().join("grid.png")).expect("should load grid");
    let sheet = Spritesheet::from_provider(&store, "grid.png", 10, 10).expect("should build");
    (store, sheet)
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_geometry_matches_texture() {
    let temp = TempDir::new().expect("should create temp dir");
    let (_, sheet) = load_grid_sheet(&temp);

    assert_eq!(sheet.width(), 40.0 / 10.0);
    assert_eq!(sheet.height(), 30.0 / 10.0);
    assert_eq!(sheet.cell_count(), 12);
}

#[test]
fn test_geometry_real_valued_for_any_size() {
    for (w, h, cw, ch) in [(40, 30, 10, 10), (33, 17, 8, 5), (7, 100, 3, 9), (1, 1, 2, 2)] {
        let sheet = Spritesheet::new(Arc::new(Texture::blank("t", w, h)), cw, ch).unwrap();
        assert_eq!(sheet.width(), w as f32 / cw as f32);
        assert_eq!(sheet.height(), h as f32 / ch as f32);
        assert_eq!(sheet.cell_count(), (w / cw) as usize * (h / ch) as usize);
    }
}

// ============================================================================
// Cell lookup
// ============================================================================

#[test]
fn test_known_rectangles() {
    let temp = TempDir::new().expect("should create temp dir");
    let (_, sheet) = load_grid_sheet(&temp);

    assert_eq!(sheet.cell(0).unwrap().rect().to_string(), "[0,0]-[10,10]");
    assert_eq!(sheet.cell(1).unwrap().rect().to_string(), "[10,0]-[20,10]");
    assert_eq!(sheet.cell(4).unwrap().rect().to_string(), "[0,10]-[10,20]");
}

#[test]
fn test_cell_pixels_come_from_the_right_place() {
    let temp = TempDir::new().expect("should create temp dir");
    let (_, sheet) = load_grid_sheet(&temp);

    for (index, region) in sheet.cells().iter().enumerate() {
        let image = region.to_image();
        assert_eq!(image.dimensions(), (10, 10));
        assert_eq!(*image.get_pixel(5, 5), Rgba([index as u8 * 10, 0, 0, 255]), "cell {}", index);
    }
}

#[test]
fn test_repeated_lookups_share_one_region() {
    let temp = TempDir::new().expect("should create temp dir");
    let (_, sheet) = load_grid_sheet(&temp);

    let regions: Vec<_> = (0..10).map(|_| sheet.cell(9).unwrap()).collect();
    assert!(regions.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    assert_eq!(sheet.cache_stats().misses, 1);
    assert_eq!(sheet.cache_stats().hits, 9);
}

#[test]
fn test_out_of_range_policies() {
    let texture = Arc::new(Texture::blank("grid", 40, 30));

    let strict = Spritesheet::new(Arc::clone(&texture), 10, 10).unwrap();
    assert_eq!(strict.policy(), BoundsPolicy::Strict);
    assert!(matches!(
        strict.cell(100),
        Err(SheetError::IndexOutOfRange { index: 100, cell_count: 12 })
    ));

    let permissive =
        Spritesheet::new(texture, 10, 10).unwrap().with_policy(BoundsPolicy::Extrapolate);
    let region = permissive.cell(12).unwrap();
    assert_eq!(region.rect(), Rect::new(0, 30, 10, 10));
    assert_eq!(region.to_image().dimensions(), (10, 0));
}

#[test]
fn test_invalid_dimensions() {
    let texture = Arc::new(Texture::blank("grid", 40, 30));
    for (cw, ch) in [(0, 10), (10, 0), (0, 0)] {
        let err = Spritesheet::new(Arc::clone(&texture), cw, ch).unwrap_err();
        assert!(matches!(err, SheetError::InvalidDimension { .. }), "{}x{}", cw, ch);
    }
}

// ============================================================================
// Bulk accessors and renderables
// ============================================================================

#[test]
fn test_renderables_follow_cells() {
    let temp = TempDir::new().expect("should create temp dir");
    let (store, sheet) = load_grid_sheet(&temp);
    let texture = store.texture("grid.png").unwrap();

    let renderables = sheet.renderables();
    assert_eq!(renderables.len(), sheet.cell_count());
    for (index, renderable) in renderables.iter().enumerate() {
        assert_eq!(renderable.rect(), sheet.cell(index).unwrap().rect());
        assert!(Arc::ptr_eq(renderable.texture(), &texture));
    }
}

#[test]
fn test_mixed_renderables() {
    let temp = TempDir::new().expect("should create temp dir");
    let (_, sheet) = load_grid_sheet(&temp);
    let sheet = Arc::new(sheet);

    let items: Vec<Arc<dyn Renderable>> =
        vec![sheet.renderable(0).unwrap(), Arc::clone(&sheet) as Arc<dyn Renderable>];
    let areas: Vec<u32> = items.iter().map(|r| r.width() * r.height()).collect();
    assert_eq!(areas, vec![100, 1200]);
}

#[test]
fn test_missing_texture_name() {
    let store = AssetStore::new();
    let err = Spritesheet::from_provider(&store, "ghost.png", 10, 10).unwrap_err();
    assert_eq!(err.to_string(), "Texture 'ghost.png' not found");
}
