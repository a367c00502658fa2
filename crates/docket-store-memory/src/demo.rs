//! The demo catalog: four employees, three of them with saved documents.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use docket_core::{
  document::{Category, Document},
  subject::Subject,
};
use uuid::Uuid;

pub const ANA: Uuid = Uuid::from_u128(0x0001);
pub const CARLOS: Uuid = Uuid::from_u128(0x0002);
pub const MARIA: Uuid = Uuid::from_u128(0x0003);
pub const JOAO: Uuid = Uuid::from_u128(0x0004);

pub(crate) fn subjects() -> Vec<Subject> {
  vec![
    Subject::new(ANA, "Ana Silva", "ana.silva@empresa.com")
      .with_department("Human Resources"),
    Subject::new(CARLOS, "Carlos Santos", "carlos.santos@empresa.com")
      .with_department("Finance"),
    Subject::new(MARIA, "Maria Oliveira", "maria.oliveira@empresa.com")
      .with_department("Sales"),
    Subject::new(JOAO, "João Pereira", "joao.pereira@empresa.com")
      .with_department("IT"),
  ]
}

pub(crate) fn saved_documents() -> HashMap<Uuid, Vec<Document>> {
  let doc = |n: u128, name: &str, category, size, at| {
    Document::saved(Uuid::from_u128(0x1000 + n), name, category, size, at)
  };

  HashMap::from([
    (ANA, vec![
      doc(1, "RG_Ana_Silva.pdf", Category::Rg, 1_024_000, day(2024, 1, 15)),
      doc(2, "CPF_Ana_Silva.pdf", Category::Cpf, 512_000, day(2024, 1, 15)),
    ]),
    (CARLOS, vec![doc(
      3,
      "Contrato_Carlos.pdf",
      Category::Contract,
      2_048_000,
      day(2024, 2, 20),
    )]),
    (MARIA, Vec::new()),
    (JOAO, vec![doc(
      4,
      "CNH_Joao.pdf",
      Category::Cnh,
      768_000,
      day(2024, 3, 10),
    )]),
  ])
}

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
  Utc
    .with_ymd_and_hms(year, month, day, 0, 0, 0)
    .single()
    .unwrap_or_default()
}
