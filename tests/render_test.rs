#![cfg(feature = "integration-tests")]

use egui::{Pos2, RawInput, Rect, vec2};
use flow_scenes::{
    animation::FrameTime,
    context::Gpu,
    demos::{
        spinning_cube::SpinningCube,
        tour_cube::{TourCube, TourState},
    },
    flow::FrameDriver,
    gui::Overlay,
    render::{self, GuiRenderer, SceneRenderer, ScreenSize},
};

const WIDTH: u32 = 256;
const HEIGHT: u32 = 192;

fn pixel(pixels: &[u8], x: u32, y: u32) -> [u8; 4] {
    let i = 4 * (y * WIDTH + x) as usize;
    [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
}

fn near(a: [u8; 4], b: [u8; 3], tolerance: u8) -> bool {
    a.iter().zip(b).all(|(a, b)| a.abs_diff(b) <= tolerance)
}

#[tokio::test]
async fn spinning_cube_is_drawn_over_the_background() -> anyhow::Result<()> {
    let gpu = Gpu::headless(WIDTH, HEIGHT).await?;
    let mut renderer = SceneRenderer::new();
    let mut driver: FrameDriver<(), ()> = FrameDriver::new(Box::new(SpinningCube::default()));
    driver.frame(FrameTime::at(0.5));

    let pixels = render::capture(&gpu, |view| renderer.draw(&gpu, view, driver.scene())).await?;
    assert_eq!(pixels.len(), (WIDTH * HEIGHT * 4) as usize);

    // 0x808080 background
    assert!(near(pixel(&pixels, 0, 0), [0x80, 0x80, 0x80], 2), "{:?}", pixel(&pixels, 0, 0));
    assert!(near(pixel(&pixels, WIDTH - 1, HEIGHT - 1), [0x80, 0x80, 0x80], 2));

    let drawn = pixels
        .chunks(4)
        .filter(|p| !near([p[0], p[1], p[2], p[3]], [0x80, 0x80, 0x80], 8))
        .count();
    assert!(drawn > 100, "only {} pixels differ from the background", drawn);
    assert!(!near(pixel(&pixels, WIDTH / 2, HEIGHT / 2), [0x80, 0x80, 0x80], 8));
    Ok(())
}

#[tokio::test]
async fn overlay_is_painted_over_the_scene() -> anyhow::Result<()> {
    let gpu = Gpu::headless(WIDTH, HEIGHT).await?;
    let mut renderer = SceneRenderer::new();
    let mut gui = GuiRenderer::new(&gpu);
    let mut overlay = Overlay::new();
    let mut driver: FrameDriver<TourState, ()> = FrameDriver::new(Box::new(TourCube::default()));
    driver.frame(FrameTime::at(0.0));

    let input = RawInput {
        screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(WIDTH as f32, HEIGHT as f32))),
        ..Default::default()
    };
    let output = overlay.run(input, &mut driver);
    let primitives = overlay.context().tessellate(output.shapes, output.pixels_per_point);
    assert!(!primitives.is_empty());
    gui.update_textures(&gpu, &output.textures_delta);
    let screen = ScreenSize {
        width: WIDTH,
        height: HEIGHT,
        pixels_per_point: output.pixels_per_point,
    };

    let scene_only = render::capture(&gpu, |view| renderer.draw(&gpu, view, driver.scene())).await?;
    let with_overlay = render::capture(&gpu, |view| {
        renderer.draw(&gpu, view, driver.scene());
        gui.draw(&gpu, view, &primitives, screen);
    })
    .await?;

    // black background; the side panel sits on the right edge
    let edge = (WIDTH - 2, HEIGHT / 2);
    assert!(near(pixel(&scene_only, edge.0, edge.1), [0, 0, 0], 2));
    assert!(!near(pixel(&with_overlay, edge.0, edge.1), [0, 0, 0], 2));
    assert_eq!(pixel(&scene_only, 1, 1), pixel(&with_overlay, 1, 1));
    Ok(())
}
