fn main() {
    dungeon_crawl::game::run();
}
