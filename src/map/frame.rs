//! One redraw: background and labels, day/night, graticule, coastlines,
//! limb and box, then the satellite tracks on top.

use crate::astro::{gmst, mjd_to_date, Precision, EARTH_RADIUS_KM};
use crate::data::GlobeOutline;
use crate::geometry::{
    footprint, graticule, inertial_to_globe, terminator, NightSide, Point2, ViewOrientation,
};
use crate::map::state::ViewContext;
use crate::predict::{GroundTrack, Illumination};
use crate::render::{Color, Edge, Fill, LineStyle, Marker, Surface};

const BACKGROUND: Color = Color::Rgb(0.0, 0.0, 0.5);
const DAY: Color = Color::Rgb(0.0, 0.0, 0.7);
const NIGHT: Color = Color::Rgb(0.0, 0.0, 0.2);
const LABEL_HEIGHT: f64 = 0.8;
const SATELLITE_LABEL_HEIGHT: f64 = 0.6;

const ORIGIN: Point2 = Point2::new(0.0, 0.0);

pub fn illumination_color(illumination: Illumination) -> Color {
    match illumination {
        Illumination::Umbra => Color::DarkGrey,
        Illumination::Penumbra => Color::LightGrey,
        Illumination::Sunlit => Color::Yellow,
    }
}

pub fn draw_frame<S>(
    surface: &mut S,
    ctx: &ViewContext,
    globe: Option<&GlobeOutline>,
    tracks: &[GroundTrack],
) where
    S: Surface + ?Sized,
{
    let view = ctx.view;

    surface.begin(ctx.half_width_km, BACKGROUND);
    surface.set_color(Color::White);
    surface.set_char_height(LABEL_HEIGHT);
    surface.label(
        Edge::Top,
        &format!("{} UTC", mjd_to_date(ctx.epoch_mjd, Precision::Seconds)),
    );
    surface.label(Edge::Bottom, &format!("l: {} s", ctx.length_s));
    surface.set_char_height(1.0);

    draw_day_night(surface, ctx.epoch_mjd, &view);

    surface.set_line_style(LineStyle::Dashed);
    surface.set_color(Color::DarkGrey);
    surface.draw_paths(&graticule(&view));
    surface.set_line_style(LineStyle::Solid);
    surface.set_color(Color::White);

    if let Some(globe) = globe {
        surface.draw_paths(&globe.paths(&view));
    }
    surface.circle(ORIGIN, EARTH_RADIUS_KM, Fill::Outline);
    surface.point(ORIGIN, Marker::Plus);
    surface.frame_box();

    let sidereal = gmst(ctx.epoch_mjd);
    for track in tracks {
        draw_track(surface, track, &view, sidereal);
    }

    log::debug!(
        "Drew frame at MJD {:.6} centred on ({:.2}, {:.2}) with {} tracks",
        ctx.epoch_mjd,
        view.longitude,
        view.latitude,
        tracks.len()
    );
}

fn draw_day_night<S>(surface: &mut S, mjd: f64, view: &ViewOrientation)
where
    S: Surface + ?Sized,
{
    let t = terminator(mjd, view);

    surface.set_color(DAY);
    surface.circle(ORIGIN, EARTH_RADIUS_KM, Fill::Solid);

    surface.set_color(NIGHT);
    match &t.night {
        NightSide::Empty => {}
        NightSide::FullDisk => surface.circle(ORIGIN, EARTH_RADIUS_KM, Fill::Solid),
        NightSide::Polygon(points) => surface.polygon(points),
    }

    if t.sun.is_near_side() {
        surface.set_color(Color::Yellow);
        surface.point(t.sun.point(), Marker::FilledCircle);
    }

    for line in &t.lines {
        surface.set_color(if line.angle_deg == 0.0 {
            Color::Red
        } else {
            Color::Blue
        });
        surface.draw_paths(&line.paths);
    }
}

/// Draw a track coloured by illumination. The first sample also gets
/// its footprint, NORAD label and marker. Samples hidden behind the
/// globe lift the pen.
pub fn draw_track<S>(surface: &mut S, track: &GroundTrack, view: &ViewOrientation, sidereal: f64)
where
    S: Surface + ?Sized,
{
    for (i, sample) in track.samples.iter().enumerate() {
        let projected = view.project(inertial_to_globe(sample.position, sidereal));
        let p = projected.point();
        let hidden = projected.is_occluded(EARTH_RADIUS_KM);

        surface.set_color(illumination_color(sample.illumination()));

        if i == 0 {
            if let Some(fp) = footprint(sample.sub_point, sample.range_km, view) {
                if let Some((from, to)) = fp.stalk {
                    surface.move_to(from);
                    surface.line_to(to);
                }
                if let Some(nadir) = fp.nadir {
                    surface.point(nadir, Marker::Circle);
                }
                surface.draw_paths(&fp.outline);
            }
            if !hidden {
                surface.set_char_height(SATELLITE_LABEL_HEIGHT);
                surface.text(p, &format!(" {}", track.norad_id));
                surface.set_char_height(1.0);
                surface.point(p, Marker::FilledCircle);
            }
            surface.move_to(p);
        } else if hidden {
            surface.move_to(p);
        } else {
            surface.line_to(p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro::{GeoPoint, J2000_MJD};
    use crate::predict::build_track;
    use crate::predict::CircularOrbit;
    use crate::render::{DrawCommand, Recorder};
    use approx::assert_abs_diff_eq;

    fn context(view: ViewOrientation) -> ViewContext {
        ViewContext {
            epoch_mjd: J2000_MJD,
            view,
            half_width_km: 1.2 * EARTH_RADIUS_KM,
            length_s: 60,
        }
    }

    /// Longitude under an equatorial orbit's first sample at J2000
    fn satellite_longitude() -> f64 {
        GeoPoint::new(-gmst(J2000_MJD), 0.0).normalized().longitude
    }

    fn position(rec: &Recorder, wanted: impl Fn(&DrawCommand) -> bool) -> usize {
        rec.commands
            .iter()
            .position(wanted)
            .expect("command not drawn")
    }

    #[test]
    fn frame_draws_layers_in_order() {
        let track = build_track(&CircularOrbit::leo(7), J2000_MJD, 50).unwrap();
        let globe = GlobeOutline::parse("0 0\n10 10\n20 20\n").unwrap();
        let ctx = context(ViewOrientation::new(satellite_longitude(), 0.0));

        let mut rec = Recorder::new();
        draw_frame(&mut rec, &ctx, Some(&globe), &[track]);

        assert_eq!(
            rec.commands[0],
            DrawCommand::Begin {
                half_width: 1.2 * EARTH_RADIUS_KM,
                background: BACKGROUND
            }
        );
        let labels: Vec<_> = rec.labels().collect();
        assert_eq!(
            labels,
            vec![
                (Edge::Top, "2000-01-01T12:00:00 UTC"),
                (Edge::Bottom, "l: 60 s")
            ]
        );

        let day = position(&rec, |c| {
            matches!(c, DrawCommand::Circle { fill: Fill::Solid, .. })
        });
        let night = position(&rec, |c| matches!(c, DrawCommand::Polygon { .. }));
        let grid = position(&rec, |c| {
            *c == DrawCommand::SetLineStyle {
                style: LineStyle::Dashed,
            }
        });
        let frame = position(&rec, |c| *c == DrawCommand::FrameBox);
        let label = position(&rec, |c| matches!(c, DrawCommand::Text { .. }));
        assert!(day < night && night < grid && grid < frame && frame < label);
        assert_eq!(rec.texts().collect::<Vec<_>>(), vec![" 7"]);
    }

    #[test]
    fn first_sample_sits_over_the_view_centre() {
        let track = build_track(&CircularOrbit::leo(7), J2000_MJD, 10).unwrap();
        let view = ViewOrientation::new(satellite_longitude(), 0.0);

        let mut rec = Recorder::new();
        draw_track(&mut rec, &track, &view, gmst(J2000_MJD));

        let marker = rec
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Point {
                    at,
                    marker: Marker::FilledCircle,
                } => Some(*at),
                _ => None,
            })
            .unwrap();
        assert_abs_diff_eq!(marker.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(marker.y, 0.0, epsilon = 1e-6);

        // Nadir circle and a fully visible footprint outline
        assert!(rec.commands.iter().any(|c| matches!(
            c,
            DrawCommand::Point {
                marker: Marker::Circle,
                ..
            }
        )));
        let segments = rec
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::LineTo { .. }))
            .count();
        // stalk and the whole outline at least
        assert!(segments > crate::geometry::CIRCLE_SAMPLES, "{segments}");
    }

    #[test]
    fn hidden_satellite_has_no_label() {
        let track = build_track(&CircularOrbit::leo(9), J2000_MJD, 10).unwrap();
        let view = ViewOrientation::new(satellite_longitude() + 180.0, 0.0);

        let mut rec = Recorder::new();
        draw_track(&mut rec, &track, &view, gmst(J2000_MJD));

        assert_eq!(rec.texts().count(), 0);
        assert!(!rec.commands.iter().any(|c| matches!(c, DrawCommand::Point { .. })));
        // Samples behind the globe only move the pen
        let pen: Vec<_> = rec
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::MoveTo { .. } | DrawCommand::LineTo { .. }))
            .take(2)
            .collect();
        assert!(pen.iter().all(|c| matches!(c, DrawCommand::MoveTo { .. })));
        assert_eq!(pen.len(), 2);
    }

    #[test]
    fn track_colour_follows_illumination() {
        assert_eq!(illumination_color(Illumination::Umbra), Color::DarkGrey);
        assert_eq!(illumination_color(Illumination::Penumbra), Color::LightGrey);
        assert_eq!(illumination_color(Illumination::Sunlit), Color::Yellow);
    }

    #[test]
    fn full_night_fills_the_disk() {
        let sub = crate::geometry::sub_solar_point(J2000_MJD);
        let ctx = context(ViewOrientation::new(sub.longitude + 180.0, -sub.latitude));

        let mut rec = Recorder::new();
        draw_frame(&mut rec, &ctx, None, &[]);

        let filled: Vec<_> = rec
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { fill: Fill::Solid, .. }))
            .collect();
        assert_eq!(filled.len(), 2);
        assert!(!rec.commands.iter().any(|c| matches!(c, DrawCommand::Polygon { .. })));
        assert!(!rec.commands.iter().any(|c| matches!(c, DrawCommand::Text { .. })));
    }
}
