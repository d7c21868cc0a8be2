//! End-to-end tests over real files: source, normalizer, sidecar provider.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use symmetry_adapters::{CanonicalNormalizer, FsImageSource, SidecarLandmarkProvider};
use symmetry_core::{
    FrameSize, ImageNormalizer, ImageSource, LandmarkTopology, SymmetryAnalyzer, NO_FACE_MESSAGE,
};
use symmetry_test_support::{uniform_face, write_sidecar, SyntheticImageBuilder};

fn analyzer(size: FrameSize) -> SymmetryAnalyzer<CanonicalNormalizer, SidecarLandmarkProvider> {
    SymmetryAnalyzer::new(
        CanonicalNormalizer::new(size),
        SidecarLandmarkProvider::default(),
        LandmarkTopology::default(),
    )
}

#[test]
fn test_exif_rotation_is_applied_before_resize() {
    let jpeg = SyntheticImageBuilder::split_jpeg(40, 20).unwrap();
    let rotated = SyntheticImageBuilder::with_exif_orientation(&jpeg, 6).unwrap();

    let frame = CanonicalNormalizer::new(FrameSize::new(10, 10))
        .normalize("rotated.jpg", &rotated)
        .unwrap();

    // Rotating 90 degrees clockwise moves the red left half to the top
    let top = frame.image.get_pixel(5, 1);
    let bottom = frame.image.get_pixel(5, 8);
    assert!(top[0] > top[2], "top should be red, got {top:?}");
    assert!(bottom[2] > bottom[0], "bottom should be blue, got {bottom:?}");
}

#[test]
fn test_scores_from_sidecar() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("face.jpg");
    SyntheticImageBuilder::write_jpeg(&image, 64, 48).unwrap();

    let mut face = uniform_face(0.5, 0.5);
    face[33] = [0.0, 0.5];
    write_sidecar(&image, &[face]).unwrap();

    let source = FsImageSource::new(vec![dir.path().to_path_buf()], false);
    let mut analyzer = analyzer(FrameSize::new(100, 100));

    let inputs: Vec<_> = source.images().collect();
    assert_eq!(inputs.len(), 1);
    let input = inputs.into_iter().next().unwrap().unwrap();

    let report = analyzer.analyze(&input).unwrap();
    let scores = report.scores().unwrap();
    assert_eq!(scores.eyes, 50.0);
    assert_eq!(scores.mouth, 100.0);
    assert_eq!(scores.vertical_symmetry, 100.0);
    assert_eq!(scores.horizontal_symmetry, 100.0);
    assert_eq!(scores.overall, 650.0 / 7.0);
}

#[test]
fn test_empty_sidecar_is_no_face() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("nobody.jpg");
    SyntheticImageBuilder::write_jpeg(&image, 32, 32).unwrap();
    write_sidecar(&image, &[]).unwrap();

    let input = symmetry_core::ImageInput::new(
        image.to_string_lossy(),
        std::fs::read(&image).unwrap(),
    );
    let report = analyzer(FrameSize::default()).analyze(&input).unwrap();

    assert_eq!(report.error_message(), Some(NO_FACE_MESSAGE));
}

#[test]
fn test_missing_sidecar_is_provider_error() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("orphan.jpg");
    SyntheticImageBuilder::write_jpeg(&image, 32, 32).unwrap();

    let input = symmetry_core::ImageInput::new(
        image.to_string_lossy(),
        std::fs::read(&image).unwrap(),
    );
    let err = analyzer(FrameSize::default()).analyze(&input).unwrap_err();

    assert!(err.to_string().contains("orphan.landmarks.json"));
}

#[test]
fn test_corrupt_jpeg_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("corrupt.jpg");
    std::fs::write(&image, b"\xFF\xD8 definitely not a jpeg").unwrap();

    let source = FsImageSource::new(vec![image], false);
    let input = source.images().next().unwrap().unwrap();
    let err = analyzer(FrameSize::default()).analyze(&input).unwrap_err();

    assert!(matches!(err, symmetry_core::AnalysisError::Decode(_)));
}
