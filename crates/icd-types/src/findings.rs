//! Clinical finding bundles.
//!
//! A finding bundle is the typed, domain-tagged attribute set produced
//! by the upstream concept extractor. One bundle per domain per encode
//! request; every bundle is independently optional and immutable once
//! produced. The engine consumes a [`FindingSet`] and never parses raw
//! text itself.

use crate::enums::{
    Acuity, CkdStage, EncounterType, HeartFailureType, InfectionSource, Intent, Laterality,
    Organism, Trimester,
};

/// Diabetes complication, in descending primary-code priority.
///
/// When several complications are documented, the highest-priority one
/// selects the primary diabetes code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiabetesComplication {
    /// Hyperosmolarity.
    Hyperosmolarity,
    /// Ketoacidosis.
    Ketoacidosis,
    /// Hypoglycemia.
    Hypoglycemia,
    /// Hyperglycemia / documented as uncontrolled.
    Hyperglycemia,
    /// Diabetic foot ulcer.
    FootUlcer,
    /// Diabetic peripheral angiopathy.
    Angiopathy,
    /// Charcot neuropathic arthropathy.
    CharcotJoint,
    /// Diabetic retinopathy.
    Retinopathy,
    /// Diabetic nephropathy without documented CKD stage.
    Nephropathy,
    /// Diabetic chronic kidney disease.
    ChronicKidneyDisease,
    /// Diabetic peripheral neuropathy.
    Neuropathy,
    /// Diabetic cataract.
    Cataract,
}

impl DiabetesComplication {
    /// Returns the selection priority (lower wins) used when several
    /// complications are documented together.
    pub fn priority(self) -> u8 {
        match self {
            Self::Hyperosmolarity => 0,
            Self::Ketoacidosis => 1,
            Self::Hypoglycemia => 2,
            Self::Hyperglycemia => 3,
            Self::FootUlcer => 4,
            Self::Angiopathy => 5,
            Self::CharcotJoint => 6,
            Self::Retinopathy => 7,
            Self::Nephropathy => 8,
            Self::ChronicKidneyDisease => 9,
            Self::Neuropathy => 10,
            Self::Cataract => 11,
        }
    }
}

/// Type of diabetes mellitus, selecting the E08–E13 code family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiabetesType {
    /// Diabetes due to an underlying condition (E08).
    SecondaryToCondition,
    /// Drug or chemical induced diabetes (E09).
    DrugInduced,
    /// Type 1 diabetes (E10).
    Type1,
    /// Type 2 diabetes (E11).
    Type2,
    /// Other specified diabetes (E13).
    OtherSpecified,
}

impl DiabetesType {
    /// Returns the three-character code family prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use icd_types::DiabetesType;
    ///
    /// assert_eq!(DiabetesType::Type2.family_prefix(), "E11");
    /// assert_eq!(DiabetesType::DrugInduced.family_prefix(), "E09");
    /// ```
    pub fn family_prefix(self) -> &'static str {
        match self {
            Self::SecondaryToCondition => "E08",
            Self::DrugInduced => "E09",
            Self::Type1 => "E10",
            Self::Type2 => "E11",
            Self::OtherSpecified => "E13",
        }
    }
}

/// Severity of diabetic retinopathy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RetinopathySeverity {
    /// Nonproliferative, severity not documented.
    Unspecified,
    /// Mild nonproliferative.
    Mild,
    /// Moderate nonproliferative.
    Moderate,
    /// Severe nonproliferative.
    Severe,
    /// Proliferative.
    Proliferative,
}

/// Site of a diabetic foot ulcer, at L97 code granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FootUlcerSite {
    /// Heel and midfoot (L97.4-).
    HeelMidfoot,
    /// Other part of the foot (L97.5-).
    OtherPartOfFoot,
}

/// Documented depth/severity of a chronic ulcer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UlcerSeverity {
    /// Limited to breakdown of skin.
    SkinBreakdown,
    /// Fat layer exposed.
    FatLayerExposed,
    /// Necrosis of muscle.
    MuscleNecrosis,
    /// Necrosis of bone.
    BoneNecrosis,
}

/// Diabetes finding bundle.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiabetesFinding {
    /// Documented diabetes type; `None` means type not documented.
    pub diabetes_type: Option<DiabetesType>,
    /// All documented complications.
    pub complications: Vec<DiabetesComplication>,
    /// CKD stage when diabetic CKD is documented.
    pub ckd_stage: Option<CkdStage>,
    /// Retinopathy severity when retinopathy is documented.
    pub retinopathy_severity: Option<RetinopathySeverity>,
    /// Macular edema accompanying retinopathy.
    pub macular_edema: bool,
    /// Foot ulcer site when a foot ulcer is documented.
    pub ulcer_site: Option<FootUlcerSite>,
    /// Foot ulcer severity when a foot ulcer is documented.
    pub ulcer_severity: Option<UlcerSeverity>,
    /// Long-term insulin use documented.
    pub insulin_use: bool,
}

impl DiabetesFinding {
    /// Returns the highest-priority documented complication, if any.
    pub fn primary_complication(&self) -> Option<DiabetesComplication> {
        self.complications.iter().copied().min_by_key(|c| c.priority())
    }

    /// Returns true if diabetic CKD involvement is documented.
    pub fn has_ckd(&self) -> bool {
        self.ckd_stage.is_some()
            || self
                .complications
                .contains(&DiabetesComplication::ChronicKidneyDisease)
    }
}

/// Renal finding bundle.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenalFinding {
    /// CKD stage, if documented.
    pub ckd_stage: Option<CkdStage>,
    /// Acute kidney injury documented.
    pub acute_kidney_injury: bool,
    /// Dependence on dialysis documented.
    pub on_dialysis: bool,
}

/// Heart failure attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeartFailureFinding {
    /// Failure type, if documented.
    pub hf_type: Option<HeartFailureType>,
    /// Episode acuity, if documented.
    pub acuity: Option<Acuity>,
}

/// Cardiovascular finding bundle.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CardiovascularFinding {
    /// Hypertension documented.
    pub hypertension: bool,
    /// Heart failure attributes, if documented.
    pub heart_failure: Option<HeartFailureFinding>,
    /// Atrial fibrillation documented.
    pub atrial_fibrillation: bool,
    /// Coronary artery disease documented.
    pub coronary_artery_disease: bool,
}

/// Infection finding bundle.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InfectionFinding {
    /// Sepsis documented.
    pub sepsis: bool,
    /// Severe sepsis (organ dysfunction) without shock.
    pub severe_sepsis: bool,
    /// Septic shock documented.
    pub septic_shock: bool,
    /// Causative organism, if identified.
    pub organism: Option<Organism>,
    /// Anatomic infection source, if documented.
    pub source: Option<InfectionSource>,
    /// Sepsis followed a procedure.
    pub post_procedural: bool,
}

/// Respiratory finding bundle.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RespiratoryFinding {
    /// COPD documented.
    pub copd: bool,
    /// Acute exacerbation of COPD.
    pub copd_exacerbation: bool,
    /// Pneumonia documented.
    pub pneumonia: bool,
    /// Causative organism of pneumonia, if identified.
    pub organism: Option<Organism>,
    /// Respiratory failure attributes, if documented.
    pub respiratory_failure: Option<RespiratoryFailureFinding>,
}

/// Respiratory failure attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RespiratoryFailureFinding {
    /// Episode acuity, if documented.
    pub acuity: Option<Acuity>,
    /// With hypoxia.
    pub hypoxia: bool,
    /// With hypercapnia.
    pub hypercapnia: bool,
}

/// Site of a peptic ulcer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UlcerSite {
    /// Gastric ulcer (K25).
    Gastric,
    /// Duodenal ulcer (K26).
    Duodenal,
}

/// Peptic ulcer attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GiUlcerFinding {
    /// Ulcer site.
    pub site: UlcerSite,
    /// With hemorrhage.
    pub hemorrhage: bool,
    /// With perforation.
    pub perforation: bool,
}

/// Gastrointestinal finding bundle.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GastroFinding {
    /// GI bleeding documented without a more specific source.
    pub gi_bleed: bool,
    /// Peptic ulcer attributes, if documented.
    pub ulcer: Option<GiUlcerFinding>,
    /// Pancreatitis acuity, if documented.
    pub pancreatitis: Option<Acuity>,
    /// Gastroesophageal reflux disease documented.
    pub gerd: bool,
}

/// Body site of a neoplasm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeoplasmSite {
    /// Lung and bronchus.
    Lung,
    /// Breast.
    Breast,
    /// Colon.
    Colon,
    /// Prostate.
    Prostate,
    /// Pancreas.
    Pancreas,
    /// Liver.
    Liver,
    /// Bone.
    Bone,
    /// Brain.
    Brain,
    /// Lymph nodes.
    LymphNodes,
}

/// Neoplasm finding bundle.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NeoplasmFinding {
    /// Primary malignancy site, if documented.
    pub primary_site: Option<NeoplasmSite>,
    /// Documented metastatic sites.
    pub metastatic_sites: Vec<NeoplasmSite>,
    /// Treatment is directed at a metastatic site rather than the
    /// primary; sequences the secondary code first.
    pub treatment_directed_at_secondary: bool,
    /// Documentation reads "metastatic X cancer" without clarifying
    /// primary-with-metastasis versus secondary-to-X.
    pub wording_ambiguous: bool,
}

/// Kind of injury.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InjuryKind {
    /// Fracture.
    Fracture,
    /// Open wound / laceration.
    Laceration,
    /// Contusion.
    Contusion,
}

/// Body site of an injury.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InjurySite {
    /// Head.
    Head,
    /// Shoulder and upper arm.
    UpperArm,
    /// Forearm.
    Forearm,
    /// Wrist and hand.
    Wrist,
    /// Femur / hip region.
    Femur,
    /// Lower leg and ankle.
    LowerLeg,
}

/// Mechanism of the external cause of an injury.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExternalCauseMechanism {
    /// Unspecified fall.
    Fall,
    /// Motor vehicle accident.
    MotorVehicleAccident,
    /// Struck by an object.
    StruckByObject,
}

/// Injury attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InjuryFinding {
    /// Injury kind.
    pub kind: InjuryKind,
    /// Body site.
    pub site: InjurySite,
    /// Laterality, if documented.
    pub laterality: Option<Laterality>,
    /// Encounter type (7th character), if documented.
    pub encounter: Option<EncounterType>,
}

/// Trauma finding bundle.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TraumaFinding {
    /// Injury attributes, if documented.
    pub injury: Option<InjuryFinding>,
    /// External cause mechanism, if documented.
    pub external_cause: Option<ExternalCauseMechanism>,
    /// Post-traumatic pain documented.
    pub post_traumatic_pain: bool,
    /// Pain chronicity when post-traumatic pain is documented.
    pub pain_acuity: Option<Acuity>,
}

/// Obstetric condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObstetricCondition {
    /// Gestational diabetes, diet controlled.
    GestationalDiabetesDietControlled,
    /// Gestational diabetes, insulin controlled.
    GestationalDiabetesInsulinControlled,
    /// Gestational diabetes, control not documented.
    GestationalDiabetesUnspecifiedControl,
    /// Pre-eclampsia, mild to moderate.
    PreeclampsiaMildModerate,
    /// Pre-eclampsia, severe.
    PreeclampsiaSevere,
    /// Hyperemesis gravidarum.
    Hyperemesis,
}

/// Obstetric finding bundle.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ObstetricFinding {
    /// Patient is pregnant.
    pub pregnant: bool,
    /// Trimester, if documented.
    pub trimester: Option<Trimester>,
    /// Obstetric condition, if documented.
    pub condition: Option<ObstetricCondition>,
}

/// Depressive episode pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DepressionEpisode {
    /// Single episode (F32).
    Single,
    /// Recurrent (F33).
    Recurrent,
}

/// Depression severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DepressionSeverity {
    /// Mild.
    Mild,
    /// Moderate.
    Moderate,
    /// Severe.
    Severe,
}

/// Depression attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DepressionFinding {
    /// Episode pattern; `None` means not documented (defaults to single).
    pub episode: Option<DepressionEpisode>,
    /// Severity, if documented.
    pub severity: Option<DepressionSeverity>,
    /// With psychotic features.
    pub with_psychosis: bool,
}

/// Anxiety disorder kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnxietyKind {
    /// Generalized anxiety disorder.
    Generalized,
    /// Panic disorder.
    Panic,
    /// Anxiety, unspecified.
    Unspecified,
}

/// Psychiatric finding bundle.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PsychiatricFinding {
    /// Depression attributes, if documented.
    pub depression: Option<DepressionFinding>,
    /// Anxiety disorder, if documented.
    pub anxiety: Option<AnxietyKind>,
    /// Bipolar disorder documented.
    pub bipolar: bool,
}

/// Substance class involved in a poisoning or adverse effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubstanceClass {
    /// Unspecified drug, medicament or biological substance.
    UnspecifiedDrug,
    /// Opioids.
    Opioid,
    /// Benzodiazepines.
    Benzodiazepine,
    /// Anticoagulants.
    Anticoagulant,
    /// Penicillins.
    Penicillin,
}

/// Poisoning / adverse-effect finding bundle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoisoningFinding {
    /// Substance class; `None` means substance not documented.
    #[cfg_attr(feature = "serde", serde(default))]
    pub substance: Option<SubstanceClass>,
    /// Event intent.
    pub intent: Intent,
    /// Encounter type (7th character), if documented.
    #[cfg_attr(feature = "serde", serde(default))]
    pub encounter: Option<EncounterType>,
}

/// The complete finding set for one encode request.
///
/// Each bundle is independently optional; an empty set encodes to an
/// empty sequence, not an error.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FindingSet {
    /// Diabetes domain.
    pub diabetes: Option<DiabetesFinding>,
    /// Renal domain.
    pub renal: Option<RenalFinding>,
    /// Cardiovascular domain.
    pub cardiovascular: Option<CardiovascularFinding>,
    /// Infection domain.
    pub infection: Option<InfectionFinding>,
    /// Gastrointestinal domain.
    pub gastro: Option<GastroFinding>,
    /// Respiratory domain.
    pub respiratory: Option<RespiratoryFinding>,
    /// Neoplasm domain.
    pub neoplasm: Option<NeoplasmFinding>,
    /// Trauma domain.
    pub trauma: Option<TraumaFinding>,
    /// Obstetric domain.
    pub obstetric: Option<ObstetricFinding>,
    /// Psychiatric domain.
    pub psychiatric: Option<PsychiatricFinding>,
    /// Poisoning / adverse-effect domain.
    pub poisoning: Option<PoisoningFinding>,
}

impl FindingSet {
    /// Creates an empty finding set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no domain has any finding bundle.
    pub fn is_empty(&self) -> bool {
        self.diabetes.is_none()
            && self.renal.is_none()
            && self.cardiovascular.is_none()
            && self.infection.is_none()
            && self.gastro.is_none()
            && self.respiratory.is_none()
            && self.neoplasm.is_none()
            && self.trauma.is_none()
            && self.obstetric.is_none()
            && self.psychiatric.is_none()
            && self.poisoning.is_none()
    }
}
