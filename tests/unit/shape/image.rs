use super::*;
use crate::{
    foundation::core::{Point, Rect},
    render::scene::SceneRecorder,
    shape::command::Command,
};

fn bar(width: f64, style: u16) -> Layer {
    Layer {
        shape: Shape::new(
            Size::new(width, 10.0),
            vec![Command::Rect(Rect::new(0.0, 0.0, width, 10.0))],
        ),
        style: StyleIndex(style),
    }
}

fn dot(radius: f64) -> Layer {
    Layer {
        shape: Shape::new(
            Size::new(4.0, 20.0),
            vec![Command::Circle {
                center: Point::new(2.0, 15.0),
                radius,
            }],
        ),
        style: StyleIndex(1),
    }
}

#[test]
fn size_is_union_of_layers() {
    let img = PathImage::new(vec![bar(30.0, 0), dot(1.0)]);
    assert_eq!(img.size(), Size::new(30.0, 20.0));
    assert_eq!(PathImage::default().size(), Size::ZERO);
}

#[test]
fn interpolation_endpoints_and_styles() {
    let a = PathImage::new(vec![bar(10.0, 0), dot(1.0)]);
    let b = PathImage::new(vec![bar(50.0, 7), dot(3.0)]);
    assert_eq!(a.interpolate(&b, 0.0).unwrap(), a);
    let end = b.interpolate(&a, 0.0).unwrap();
    assert_eq!(end, b);

    let mid = a.interpolate(&b, 0.5).unwrap();
    assert_eq!(mid.width(), 30.0);
    assert_eq!(mid.layers()[0].style, StyleIndex(0));
    assert_eq!(PathImage::width_between(&a, &b, 0.25), 20.0);
}

#[test]
fn layer_mismatch_names_the_layer() {
    let a = PathImage::new(vec![bar(10.0, 0), dot(1.0)]);
    let b = PathImage::new(vec![bar(10.0, 0), bar(5.0, 1)]);
    let err = a.check_compatible(&b).unwrap_err().to_string();
    assert!(err.contains("layer 1"), "{err}");
    assert!(!a.is_compatible(&PathImage::new(vec![bar(1.0, 0)])));
}

#[test]
fn plot_draws_each_layer_with_its_style_and_paint() {
    let img = PathImage::new(vec![bar(10.0, 0), dot(1.0)]);
    let paint = Paint {
        emphasis: 0.75,
        opacity: 0.5,
        color_offset: 3,
    };
    let mut rec = SceneRecorder::new();
    img.plot(&mut rec, &paint);

    let styles: Vec<_> = rec.ops().iter().map(|op| op.style).collect();
    assert_eq!(styles, vec![StyleIndex(0), StyleIndex(1)]);
    assert!(rec.ops().iter().all(|op| op.paint == paint));
}

#[test]
fn plot_interpolated_blends_geometry() {
    let a = PathImage::new(vec![bar(10.0, 0)]);
    let b = PathImage::new(vec![bar(30.0, 0)]);
    let mut rec = SceneRecorder::new();
    PathImage::plot_interpolated(&a, &b, 0.5, &mut rec, &Paint::default());
    use kurbo::Shape as _;
    assert_eq!(rec.ops()[0].path.bounding_box().width(), 20.0);
}
