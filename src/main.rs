fn main() {
    combat_camera::game::run();
}
