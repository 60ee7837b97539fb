//! XYZ text format support
//!
//! One point per line, whitespace separated: `x y z` with optional
//! `nx ny nz` normal columns. Lines starting with `#` are comments.

use crate::{PointCloudReader, PointCloudWriter};
use pointsurf_core::{Error, Point3f, PointCloud, Result, Vector3f};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

pub struct XyzReader;
pub struct XyzWriter;

impl PointCloudReader for XyzReader {
    fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<PointCloud> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut points = Vec::new();
        let mut normals = Vec::new();
        let mut all_have_normals = true;

        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<f32> = line
                .split_whitespace()
                .map(|f| {
                    f.parse::<f32>().map_err(|_| {
                        Error::InvalidData(format!(
                            "line {}: '{}' is not a number",
                            lineno + 1,
                            f
                        ))
                    })
                })
                .collect::<Result<_>>()?;

            match fields.len() {
                3 => {
                    points.push(Point3f::new(fields[0], fields[1], fields[2]));
                    all_have_normals = false;
                }
                6 => {
                    points.push(Point3f::new(fields[0], fields[1], fields[2]));
                    normals.push(Vector3f::new(fields[3], fields[4], fields[5]));
                }
                n => {
                    return Err(Error::InvalidData(format!(
                        "line {}: expected 3 or 6 columns, got {}",
                        lineno + 1,
                        n
                    )))
                }
            }
        }

        let mut cloud = PointCloud::from_points(points);
        if all_have_normals && !normals.is_empty() {
            cloud.set_normals(normals);
        }
        Ok(cloud)
    }
}

impl PointCloudWriter for XyzWriter {
    fn write_point_cloud<P: AsRef<Path>>(cloud: &PointCloud, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        match cloud.normals() {
            Some(normals) => {
                for (p, n) in cloud.iter().zip(normals) {
                    writeln!(writer, "{} {} {} {} {} {}", p.x, p.y, p.z, n.x, n.y, n.z)?;
                }
            }
            None => {
                for p in cloud.iter() {
                    writeln!(writer, "{} {} {}", p.x, p.y, p.z)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(name)
    }

    #[test]
    fn roundtrip_with_normals() {
        let path = temp_path("pointsurf_cloud.xyz");
        let cloud = PointCloud::from_points_and_normals(
            vec![Point3f::new(1.0, 2.0, 3.0), Point3f::new(-1.0, 0.0, 0.5)],
            vec![Vector3f::z(), Vector3f::y()],
        );
        XyzWriter::write_point_cloud(&cloud, &path).unwrap();

        let loaded = XyzReader::read_point_cloud(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.has_normals());
        assert_eq!(loaded.normals().unwrap()[1], Vector3f::y());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let path = temp_path("pointsurf_comments.xyz");
        fs::write(&path, "# header\n\n0 0 0\n1 1 1\n").unwrap();

        let loaded = XyzReader::read_point_cloud(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(!loaded.has_normals());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn bad_column_count_is_rejected() {
        let path = temp_path("pointsurf_bad.xyz");
        fs::write(&path, "0 0\n").unwrap();
        assert!(XyzReader::read_point_cloud(&path).is_err());
        fs::remove_file(&path).ok();
    }
}
