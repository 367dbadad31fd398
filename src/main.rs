use tilewalker::engine::Viewer;

fn main() {
    env_logger::init();

    Viewer::builder()
        .with_title("tilewalker")
        .with_sprite_folder("resources/sprites")
        .run();
}
