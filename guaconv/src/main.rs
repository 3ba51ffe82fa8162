use {
    anyhow::{Context as _, Result as Anyhow},
    camino::{Utf8Path as Path, Utf8PathBuf as PathBuf},
    guaimage::Header,
};

fn main() -> Anyhow<()> {
    log_init(log::LevelFilter::Info);

    let images: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if images.is_empty() {
        eprintln!("usage: guaconv <image>...");
        return Ok(());
    }

    // inputs are independent, but the first failure stops the batch
    for path in &images {
        convert_to_guaimage(path)?;
    }

    Ok(())
}

fn convert_to_guaimage(path: &Path) -> Anyhow<PathBuf> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {path}"))?;
    let image = image::load_from_memory(&bytes)
        .with_context(|| format!("decoding {path}"))?
        .into_rgba8();

    let header = Header {
        wide: image.width(),
        high: image.height(),
    };
    log::debug!("{path}: {}x{}", header.wide, header.high);

    let text = guaimage::encode_guai_file(header, bytemuck::cast_slice(&image))?;

    let out_path = path.with_extension(guaimage::EXTENSION);
    std::fs::write(&out_path, text).with_context(|| format!("writing {out_path}"))?;

    log::info!("converted {path} to {out_path}");
    Ok(out_path)
}

fn log_init(filter: log::LevelFilter) {
    use simplelog::*;
    let simple = TermLogger::new(
        filter,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
    CombinedLogger::init(vec![simple]).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_derivation() {
        let derive = |p: &str| Path::new(p).with_extension(guaimage::EXTENSION);
        assert_eq!(derive("foo/bar.png"), PathBuf::from("foo/bar.iamge"));
        assert_eq!(derive("img"), PathBuf::from("img.iamge"));
        assert_eq!(derive("a/b.c/pic.tga"), PathBuf::from("a/b.c/pic.iamge"));
    }

    #[test]
    fn convert_png_end_to_end() {
        let dir = PathBuf::from_path_buf(std::env::temp_dir()).unwrap();
        let png = dir.join(format!("guaconv-test-{}.png", std::process::id()));
        image::RgbaImage::from_fn(2, 1, |x, _| match x {
            0 => image::Rgba([255, 0, 0, 255]),
            _ => image::Rgba([0, 255, 0, 255]),
        })
        .save(&png)
        .unwrap();

        let out = convert_to_guaimage(&png).unwrap();
        assert_eq!(out, png.with_extension("iamge"));

        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text, "guaimage\n1.0\n2\n1\n4278190335 16711935");

        // a second run overwrites with identical bytes
        convert_to_guaimage(&png).unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), text);

        std::fs::remove_file(&png).unwrap();
        std::fs::remove_file(&out).unwrap();
    }

    #[test]
    fn convert_rejects_non_images() {
        let dir = PathBuf::from_path_buf(std::env::temp_dir()).unwrap();
        let path = dir.join(format!("guaconv-test-{}.txt", std::process::id()));
        std::fs::write(&path, "not an image").unwrap();

        assert!(convert_to_guaimage(&path).is_err());
        assert!(!path.with_extension("iamge").exists());

        std::fs::remove_file(&path).unwrap();
    }
}
