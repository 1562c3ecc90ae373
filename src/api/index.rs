use actix_files::NamedFile;
use actix_web::web;
use crate::api::AssetPaths;

// GET / - sempre o mesmo documento, sem template
pub async fn index(assets: web::Data<AssetPaths>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open_async(&assets.index_file).await?)
}
