use {
    anyhow::{Context as _, Result as Anyhow},
    camino::Utf8PathBuf,
};

fn main() -> Anyhow<()> {
    let path = std::env::args().nth(1).context("usage: unguai input.iamge")?;
    let path = Utf8PathBuf::from(path);

    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let (header, pixels) = guaimage::decode_guai_file(&text)?;

    let out_path = path.with_extension("png");
    image::RgbaImage::from_vec(header.wide, header.high, bytemuck::cast_vec(pixels))
        .context("pixel buffer does not match header dimensions")?
        .save(&out_path)
        .with_context(|| format!("writing {out_path}"))?;

    eprintln!("{out_path}");
    Ok(())
}
