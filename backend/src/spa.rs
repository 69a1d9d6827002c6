use std::path::PathBuf;
use rocket::{State, fs::NamedFile};

pub struct StaticDir(pub PathBuf);

#[rocket::get("/<path..>", rank = 20)]
pub async fn spa_handler(path: PathBuf, static_dir: &State<StaticDir>) -> Option<NamedFile> {
    let file_path = static_dir.0.join(&path);
    if file_path.is_file() {
        NamedFile::open(&file_path).await.ok()
    } else {
        NamedFile::open(static_dir.0.join("index.html")).await.ok()
    }
}
