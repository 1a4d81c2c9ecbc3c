use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::farmers::dtos::{FarmerInputDto, FarmerResponseDto};
use crate::features::farms::dtos::{FarmInputDto, FarmResponseDto};

/// Combined payload of the two-step farmer + farm wizard.
///
/// Field errors come back keyed `farmer.*` and `farm.*`. `farm.farmer_id`
/// is ignored; the farm is owned by the farmer created in the same request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegistrationDto {
    #[validate(nested)]
    #[serde(default)]
    pub farmer: FarmerInputDto,
    #[validate(nested)]
    #[serde(default)]
    pub farm: FarmInputDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationResponseDto {
    pub farmer: FarmerResponseDto,
    pub farm: FarmResponseDto,
}
