pub const MAGIC: &str = "guaimage";
pub const VERSION: &str = "1.0";

// the transposed spelling is load-bearing: consumers look up ".iamge" files
pub const EXTENSION: &str = "iamge";

pub type Pixel = [u8; 4];

// r lands in the most significant byte, a in the least
pub fn pack_pixel(pixel: Pixel) -> u32 {
    u32::from_be_bytes(pixel)
}

pub fn unpack_pixel(value: u32) -> Pixel {
    value.to_be_bytes()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub wide: u32,
    pub high: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("file header has wrong magic (not 'guaimage')")]
    WrongMagic,
    #[error("unsupported format version {0:?}")]
    WrongVersion(String),
    #[error("header truncated")]
    Truncated,
    #[error("bad image dimension {0:?}")]
    BadDimension(String),
    #[error("either image dimension is zero")]
    ZeroDimension,
}

impl Header {
    fn write(self, out: &mut String) {
        use std::fmt::Write as _;
        let _ = write!(out, "{MAGIC}\n{VERSION}\n{}\n{}", self.wide, self.high);
    }

    fn parse(lines: &mut std::str::Lines) -> Result<Header, HeaderError> {
        let magic = lines.next().ok_or(HeaderError::Truncated)?;
        if magic.trim() != MAGIC {return Err(HeaderError::WrongMagic)}
        let version = lines.next().ok_or(HeaderError::Truncated)?;
        if version.trim() != VERSION {return Err(HeaderError::WrongVersion(version.into()))}
        let wide = parse_dimension(lines.next())?;
        let high = parse_dimension(lines.next())?;
        if wide == 0 || high == 0 {return Err(HeaderError::ZeroDimension)}
        Ok(Header{wide, high})
    }
}

fn parse_dimension(line: Option<&str>) -> Result<u32, HeaderError> {
    let line = line.ok_or(HeaderError::Truncated)?;
    line.trim().parse().map_err(|_| HeaderError::BadDimension(line.into()))
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("got {got} pixels for a {wide}x{high} image")]
    WrongPixelCount { got: usize, wide: u32, high: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Header(#[from] HeaderError),
    #[error("row {row} is missing")]
    MissingRow { row: u32 },
    #[error("row {row} ends after {got} pixels, expected {expected}")]
    ShortRow { row: u32, got: u32, expected: u32 },
    #[error("bad pixel value at row {row}, column {col}")]
    BadPixel { row: u32, col: u32 },
}

// Pixels come in top-down row-major; grid rows leave in bottom-to-top order,
// so the first row after the header is the image's bottom scanline.
pub fn encode_guai_file(header: Header, pixels: &[Pixel]) -> Result<String, EncodeError> {
    use std::fmt::Write as _;

    let wide = header.wide as usize;
    let high = header.high as usize;
    if pixels.len() != wide * high {
        return Err(EncodeError::WrongPixelCount {
            got: pixels.len(),
            wide: header.wide,
            high: header.high,
        });
    }

    let mut text = String::with_capacity(16 + 11 * pixels.len());
    header.write(&mut text);

    for y in (0..high).rev() {
        text.push('\n');
        let row = &pixels[y * wide..][..wide];
        for (x, &pixel) in row.iter().enumerate() {
            if x != 0 {text.push(' ')}
            let _ = write!(text, "{}", pack_pixel(pixel));
        }
    }

    Ok(text)
}

// Inverse of encode: returns pixels in top-down row-major order. Content past
// the last grid row is ignored.
pub fn decode_guai_file(text: &str) -> Result<(Header, Vec<Pixel>), DecodeError> {
    let mut lines = text.lines();
    let header = Header::parse(&mut lines)?;
    let wide = header.wide as usize;
    let high = header.high as usize;

    let mut pixels = vec![[0u8; 4]; wide * high];
    for i in 0..high {
        let row = i as u32;
        let line = lines.next().ok_or(DecodeError::MissingRow{row})?;

        // grid row i holds scanline high - 1 - i
        let out = &mut pixels[(high - 1 - i) * wide..][..wide];
        let mut values = line.split(' ');
        for (x, pixel) in out.iter_mut().enumerate() {
            let value = values.next().ok_or(DecodeError::ShortRow {
                row,
                got: x as u32,
                expected: header.wide,
            })?;
            let value: u32 = value.parse()
                .map_err(|_| DecodeError::BadPixel{row, col: x as u32})?;
            *pixel = unpack_pixel(value);
        }
    }

    Ok((header, pixels))
}
