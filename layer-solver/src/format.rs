//! Serde model of the FOLD file format.
//! See https://github.com/edemaine/fold/blob/main/doc/spec.md

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct Fold {
  pub file_spec: f64,
  pub file_creator: String,
  pub file_author: String,
  pub file_title: String,
  pub file_description: String,
  pub file_classes: Vec<String>,
  #[serde(flatten)]
  pub key_frame: Frame,
  pub file_frames: Vec<Frame>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct Frame {
  pub frame_author: String,
  pub frame_title: String,
  pub frame_description: String,
  pub frame_classes: Vec<String>,
  pub frame_attributes: Vec<String>,
  pub frame_unit: String,
  pub vertices_coords: Vec<Vec<f64>>,
  pub vertices_vertices: Vec<Vec<usize>>,
  pub vertices_edges: Vec<Vec<usize>>,
  pub vertices_faces: Vec<Vec<Option<usize>>>,
  pub edges_vertices: Vec<(usize, usize)>,
  pub edges_faces: Vec<Vec<Option<usize>>>,
  pub edges_assignment: Vec<String>,
  #[serde(rename = "edges_foldAngle")]
  pub edges_fold_angle: Vec<Option<f64>>,
  pub edges_length: Vec<f64>,
  pub faces_vertices: Vec<Vec<usize>>,
  pub faces_edges: Vec<Vec<usize>>,
  pub faces_faces: Vec<Vec<Option<usize>>>,
  #[serde(rename = "faceOrders")]
  pub face_orders: Vec<(usize, usize, i8)>,
  #[serde(rename = "edgeOrders")]
  pub edge_orders: Vec<(usize, usize, i8)>,
  pub frame_parent: Option<usize>,
  pub frame_inherit: bool,
}

impl Fold {
  /// The frame holding folded geometry: a `foldedForm` frame if one is
  /// present, otherwise the key frame.
  pub fn folded_frame(&self) -> &Frame {
    self
      .file_frames
      .iter()
      .find(|f| f.frame_classes.iter().any(|c| c == "foldedForm"))
      .unwrap_or(&self.key_frame)
  }
}
