//! Smallest sfnt that `ttf-parser` accepts: `head`, `hhea`, `maxp` and a
//! `name` table holding one Windows Unicode family name.

/// Builds a TrueType font whose family name is `family`.
pub fn minimal_font(family: &str) -> Vec<u8> {
    let tables: [(&[u8; 4], Vec<u8>); 4] = [
        (b"head", head()),
        (b"hhea", hhea()),
        (b"maxp", maxp()),
        (b"name", name(family)),
    ];
    let directory_len = 12 + 16 * tables.len();

    let mut font = Vec::new();
    put_u32(&mut font, 0x0001_0000);
    put_u16(&mut font, tables.len() as u16);
    put_u16(&mut font, 64); // searchRange
    put_u16(&mut font, 2); // entrySelector
    put_u16(&mut font, 0); // rangeShift

    // Records are sorted by tag.
    let mut body = Vec::new();
    for (tag, table) in &tables {
        font.extend_from_slice(*tag);
        put_u32(&mut font, 0); // checksum, not verified
        put_u32(&mut font, (directory_len + body.len()) as u32);
        put_u32(&mut font, table.len() as u32);

        body.extend_from_slice(table);
        while body.len() % 4 != 0 {
            body.push(0);
        }
    }
    font.extend(body);
    font
}

fn head() -> Vec<u8> {
    let mut table = Vec::new();
    put_u32(&mut table, 0x0001_0000); // version
    put_u32(&mut table, 0x0001_0000); // fontRevision
    put_u32(&mut table, 0); // checksumAdjustment
    put_u32(&mut table, 0x5F0F_3CF5); // magicNumber
    put_u16(&mut table, 0); // flags
    put_u16(&mut table, 1000); // unitsPerEm
    table.extend([0; 16]); // created, modified
    table.extend([0; 8]); // xMin, yMin, xMax, yMax
    put_u16(&mut table, 0); // macStyle
    put_u16(&mut table, 8); // lowestRecPPEM
    put_u16(&mut table, 2); // fontDirectionHint
    put_u16(&mut table, 0); // indexToLocFormat
    put_u16(&mut table, 0); // glyphDataFormat
    assert_eq!(table.len(), 54);
    table
}

fn hhea() -> Vec<u8> {
    let mut table = Vec::new();
    put_u32(&mut table, 0x0001_0000);
    put_u16(&mut table, 800); // ascender
    put_u16(&mut table, (-200i16) as u16); // descender
    put_u16(&mut table, 0); // lineGap
    table.extend([0; 24]);
    put_u16(&mut table, 1); // numberOfHMetrics
    assert_eq!(table.len(), 36);
    table
}

fn maxp() -> Vec<u8> {
    let mut table = Vec::new();
    put_u32(&mut table, 0x0000_5000);
    put_u16(&mut table, 1); // numGlyphs
    table
}

fn name(family: &str) -> Vec<u8> {
    let encoded: Vec<u8> = family.encode_utf16().flat_map(u16::to_be_bytes).collect();

    let mut table = Vec::new();
    put_u16(&mut table, 0); // format
    put_u16(&mut table, 1); // count
    put_u16(&mut table, 6 + 12); // stringOffset
    put_u16(&mut table, 3); // platformID: Windows
    put_u16(&mut table, 1); // encodingID: Unicode BMP
    put_u16(&mut table, 0x0409); // languageID: en-US
    put_u16(&mut table, 1); // nameID: family
    put_u16(&mut table, encoded.len() as u16);
    put_u16(&mut table, 0);
    table.extend(encoded);
    table
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend(value.to_be_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend(value.to_be_bytes());
}
