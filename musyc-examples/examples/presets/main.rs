//! Headless slider session
//!
//! Moves a few sliders, applies every preset and reports how many recomputations were
//! triggered. Each preset writes several sliders but recomputes exactly once.

use musyc::{Camera, Controller, Preset, Result, Slider, View};
use nalgebra::Vector3;

fn main() -> Result<()> {
    let mut controller = Controller::new(View::All)?;
    for slider in Slider::ALL {
        let range = slider.range();
        println!(
            "{:<12} {:>+.3}  [{:+}, {:+}] step {}",
            slider.description(),
            controller.value(slider),
            range.min,
            range.max,
            range.step
        );
    }

    controller.set(Slider::LogAlpha12, 1.)?;
    controller.set(Slider::LogGamma21, 0.6)?;
    controller.set(Slider::Beta, 0.5)?;
    println!("\nafter 3 slider moves: {} recomputations", controller.recomputations());

    for preset in [
        Preset::MusycNull,
        Preset::BlissNull,
        Preset::LoeweNull,
        Preset::Reset,
    ] {
        controller.apply(preset)?;
        let frame = controller.frame();
        println!(
            "{preset:<10?} E3 {:>.3}  recomputations {}",
            frame.parameters.e3,
            controller.recomputations()
        );
        for plot in &frame.plots {
            let (cmin, cmax) = plot.style.color_limits();
            println!(
                "    {:<14} {:?} grid, colors {} [{cmin}, {cmax}]",
                plot.style.title,
                plot.grid.shape(),
                plot.style.colorscale
            );
        }
    }

    if let Some(plot) = controller.frame().plots.first() {
        let (d1, _) = plot.doses();
        println!(
            "\ndoses recovered from the {} axes: {} points up to {}",
            plot.style.title,
            d1.len(),
            d1.max()
        );
    }

    let camera = Camera {
        eye: Vector3::new(2., 2., 0.5),
        ..Camera::default()
    };
    let cameras = controller.cameras_mut();
    let written = cameras.on_change(0, camera);
    println!(
        "\ncamera change written to {written} scenes, {} echoed events ignored",
        cameras.ignored()
    );
    Ok(())
}
