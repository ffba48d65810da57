use std::path::Path;

use petdeck::slideshow::{Slideshow, SlideshowState};
use petdeck::source::{BundledSource, ImageList, ImageSource, Shuffled};

fn fixture() -> BundledSource {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/pets.json");
    BundledSource::from_path(&path).unwrap()
}

#[test]
fn bundled_fixture_yields_first_images() {
    let images = fixture().fetch_image_list().unwrap();
    assert_eq!(
        images.to_vec(),
        vec![
            "https://pets.test/biscuit-1.jpg",
            "https://pets.test/pepper.jpg",
            "https://pets.test/juniper.png",
        ]
    );
}

#[test]
fn slideshow_wraps_over_bundled_list() {
    let images = fixture().fetch_image_list().unwrap();
    let mut slideshow = Slideshow::new(10.0);
    slideshow.set_images(images.clone());
    assert_eq!(slideshow.state(), SlideshowState::Playing);

    for k in 0..20 {
        assert_eq!(slideshow.current_index(), k % images.len());
        assert_eq!(slideshow.current_url(), Some(images[k % images.len()].as_str()));
        slideshow.tick(10.0);
    }
}

#[test]
fn shuffled_fixture_keeps_every_image() {
    let mut original = fixture().fetch_image_list().unwrap().to_vec();
    let mut shuffled = Shuffled::with_seed(fixture(), 42).fetch_image_list().unwrap().to_vec();
    original.sort();
    shuffled.sort();
    assert_eq!(original, shuffled);
}

#[test]
fn empty_list_never_advances() {
    let mut slideshow = Slideshow::new(0.5);
    slideshow.set_images(ImageList::empty());
    for _ in 0..100 {
        slideshow.tick(0.5);
    }
    assert_eq!(slideshow.state(), SlideshowState::Loading);
    assert!(slideshow.frame().loading);
    assert_eq!(slideshow.current_url(), None);
}
