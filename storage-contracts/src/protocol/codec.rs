// SPDX-License-Identifier: GPL-3.0-only

//! Entity codecs
//!
//! Each entity travels as an object carrying a `class` discriminator next to
//! its fields. Decoding checks the discriminator first, so handing a volume
//! object to the pool decoder fails instead of producing a bogus pool.

use std::collections::BTreeMap;

use storage_types::{
    AccessGroup, BlockRange, Capabilities, Disk, FileSystem, Initiator, NfsExport, Pool, Snapshot,
    System, UnknownCode, Volume,
};

use super::{DecodeError, Value};

/// Conversion between a typed entity and its wire object
pub trait WireEntity: Sized {
    /// Value of the `class` discriminator
    const CLASS: &'static str;

    fn to_value(&self) -> Value;

    fn from_value(value: &Value) -> Result<Self, DecodeError>;
}

/// Builds a class-tagged object
pub(crate) struct ObjectBuilder {
    fields: BTreeMap<String, Value>,
}

impl ObjectBuilder {
    pub(crate) fn new(class: &'static str) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("class".to_string(), Value::from(class));
        Self { fields }
    }

    pub(crate) fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub(crate) fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Field reader over an object whose class has been checked
pub(crate) struct ObjectReader<'a> {
    fields: &'a BTreeMap<String, Value>,
}

impl<'a> ObjectReader<'a> {
    pub(crate) fn open(value: &'a Value, class: &'static str) -> Result<Self, DecodeError> {
        let fields = value.as_object()?;
        let found = fields
            .get("class")
            .ok_or(DecodeError::MissingField("class"))?
            .as_str()
            .map_err(|e| e.in_field("class"))?;
        if found != class {
            return Err(DecodeError::WrongClass {
                expected: class,
                found: found.to_string(),
            });
        }
        Ok(Self { fields })
    }

    fn raw(&self, name: &'static str) -> Result<&'a Value, DecodeError> {
        self.fields.get(name).ok_or(DecodeError::MissingField(name))
    }

    pub(crate) fn string(&self, name: &'static str) -> Result<String, DecodeError> {
        self.raw(name)?
            .as_str()
            .map(str::to_string)
            .map_err(|e| e.in_field(name))
    }

    pub(crate) fn u64(&self, name: &'static str) -> Result<u64, DecodeError> {
        self.raw(name)?.as_u64().map_err(|e| e.in_field(name))
    }

    pub(crate) fn u32(&self, name: &'static str) -> Result<u32, DecodeError> {
        self.raw(name)?.as_u32().map_err(|e| e.in_field(name))
    }

    pub(crate) fn code<T>(&self, name: &'static str) -> Result<T, DecodeError>
    where
        T: TryFrom<i32, Error = UnknownCode>,
    {
        let raw = self.raw(name)?.as_i32().map_err(|e| e.in_field(name))?;
        T::try_from(raw).map_err(|e| DecodeError::from(e).in_field(name))
    }

    pub(crate) fn strings(&self, name: &'static str) -> Result<Vec<String>, DecodeError> {
        string_list_from_value(self.raw(name)?).map_err(|e| e.in_field(name))
    }
}

pub fn string_list_to_value(items: &[String]) -> Value {
    Value::Array(items.iter().map(Value::from).collect())
}

/// An absent list travels as null
pub fn optional_string_list_to_value(items: Option<&[String]>) -> Value {
    items.map_or(Value::Null, string_list_to_value)
}

pub fn string_list_from_value(value: &Value) -> Result<Vec<String>, DecodeError> {
    value
        .as_array()?
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_str()
                .map(str::to_string)
                .map_err(|e| e.at_index(index))
        })
        .collect()
}

pub fn entity_list_to_value<T: WireEntity>(items: &[T]) -> Value {
    Value::Array(items.iter().map(WireEntity::to_value).collect())
}

impl WireEntity for System {
    const CLASS: &'static str = "System";

    fn to_value(&self) -> Value {
        ObjectBuilder::new(Self::CLASS)
            .field("id", &self.id)
            .field("name", &self.name)
            .build()
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let obj = ObjectReader::open(value, Self::CLASS)?;
        Ok(Self {
            id: obj.string("id")?,
            name: obj.string("name")?,
        })
    }
}

impl WireEntity for Pool {
    const CLASS: &'static str = "Pool";

    fn to_value(&self) -> Value {
        ObjectBuilder::new(Self::CLASS)
            .field("id", &self.id)
            .field("name", &self.name)
            .field("total_space", self.total_space)
            .field("free_space", self.free_space)
            .field("system_id", &self.system_id)
            .build()
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let obj = ObjectReader::open(value, Self::CLASS)?;
        Ok(Self {
            id: obj.string("id")?,
            name: obj.string("name")?,
            total_space: obj.u64("total_space")?,
            free_space: obj.u64("free_space")?,
            system_id: obj.string("system_id")?,
        })
    }
}

impl WireEntity for Volume {
    const CLASS: &'static str = "Volume";

    fn to_value(&self) -> Value {
        ObjectBuilder::new(Self::CLASS)
            .field("id", &self.id)
            .field("name", &self.name)
            .field("vpd83", &self.vpd83)
            .field("block_size", self.block_size)
            .field("num_of_blocks", self.num_of_blocks)
            .field("status", self.status)
            .field("system_id", &self.system_id)
            .build()
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let obj = ObjectReader::open(value, Self::CLASS)?;
        Ok(Self {
            id: obj.string("id")?,
            name: obj.string("name")?,
            vpd83: obj.string("vpd83")?,
            block_size: obj.u64("block_size")?,
            num_of_blocks: obj.u64("num_of_blocks")?,
            status: obj.u32("status")?,
            system_id: obj.string("system_id")?,
        })
    }
}

impl WireEntity for Disk {
    const CLASS: &'static str = "Disk";

    fn to_value(&self) -> Value {
        ObjectBuilder::new(Self::CLASS)
            .field("id", &self.id)
            .field("name", &self.name)
            .field("disk_type", self.disk_type.code())
            .field("block_size", self.block_size)
            .field("num_of_blocks", self.num_of_blocks)
            .field("status", self.status)
            .field("system_id", &self.system_id)
            .build()
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let obj = ObjectReader::open(value, Self::CLASS)?;
        Ok(Self {
            id: obj.string("id")?,
            name: obj.string("name")?,
            disk_type: obj.code("disk_type")?,
            block_size: obj.u64("block_size")?,
            num_of_blocks: obj.u64("num_of_blocks")?,
            status: obj.u64("status")?,
            system_id: obj.string("system_id")?,
        })
    }
}

impl WireEntity for Initiator {
    const CLASS: &'static str = "Initiator";

    fn to_value(&self) -> Value {
        ObjectBuilder::new(Self::CLASS)
            .field("id", &self.id)
            .field("type", self.init_type.code())
            .field("name", &self.name)
            .build()
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let obj = ObjectReader::open(value, Self::CLASS)?;
        Ok(Self {
            id: obj.string("id")?,
            init_type: obj.code("type")?,
            name: obj.string("name")?,
        })
    }
}

impl WireEntity for AccessGroup {
    const CLASS: &'static str = "AccessGroup";

    fn to_value(&self) -> Value {
        ObjectBuilder::new(Self::CLASS)
            .field("id", &self.id)
            .field("name", &self.name)
            .field("initiators", string_list_to_value(&self.initiators))
            .field("system_id", &self.system_id)
            .build()
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let obj = ObjectReader::open(value, Self::CLASS)?;
        Ok(Self {
            id: obj.string("id")?,
            name: obj.string("name")?,
            initiators: obj.strings("initiators")?,
            system_id: obj.string("system_id")?,
        })
    }
}

impl WireEntity for FileSystem {
    const CLASS: &'static str = "FileSystem";

    fn to_value(&self) -> Value {
        ObjectBuilder::new(Self::CLASS)
            .field("id", &self.id)
            .field("name", &self.name)
            .field("total_space", self.total_space)
            .field("free_space", self.free_space)
            .field("pool_id", &self.pool_id)
            .field("system_id", &self.system_id)
            .build()
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let obj = ObjectReader::open(value, Self::CLASS)?;
        Ok(Self {
            id: obj.string("id")?,
            name: obj.string("name")?,
            total_space: obj.u64("total_space")?,
            free_space: obj.u64("free_space")?,
            pool_id: obj.string("pool_id")?,
            system_id: obj.string("system_id")?,
        })
    }
}

impl WireEntity for Snapshot {
    const CLASS: &'static str = "Snapshot";

    fn to_value(&self) -> Value {
        ObjectBuilder::new(Self::CLASS)
            .field("id", &self.id)
            .field("name", &self.name)
            .field("ts", self.ts)
            .build()
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let obj = ObjectReader::open(value, Self::CLASS)?;
        Ok(Self {
            id: obj.string("id")?,
            name: obj.string("name")?,
            ts: obj.u64("ts")?,
        })
    }
}

impl WireEntity for NfsExport {
    const CLASS: &'static str = "NfsExport";

    fn to_value(&self) -> Value {
        ObjectBuilder::new(Self::CLASS)
            .field("id", &self.id)
            .field("fs_id", &self.fs_id)
            .field("export_path", &self.export_path)
            .field("auth", &self.auth)
            .field("root", string_list_to_value(&self.root))
            .field("rw", string_list_to_value(&self.rw))
            .field("ro", string_list_to_value(&self.ro))
            .field("anonuid", self.anonuid)
            .field("anongid", self.anongid)
            .field("options", &self.options)
            .build()
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let obj = ObjectReader::open(value, Self::CLASS)?;
        Ok(Self {
            id: obj.string("id")?,
            fs_id: obj.string("fs_id")?,
            export_path: obj.string("export_path")?,
            auth: obj.string("auth")?,
            root: obj.strings("root")?,
            rw: obj.strings("rw")?,
            ro: obj.strings("ro")?,
            anonuid: obj.u64("anonuid")?,
            anongid: obj.u64("anongid")?,
            options: obj.string("options")?,
        })
    }
}

impl WireEntity for BlockRange {
    const CLASS: &'static str = "BlockRange";

    fn to_value(&self) -> Value {
        ObjectBuilder::new(Self::CLASS)
            .field("src_block", self.src_block)
            .field("dest_block", self.dest_block)
            .field("block_count", self.block_count)
            .build()
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let obj = ObjectReader::open(value, Self::CLASS)?;
        Ok(Self {
            src_block: obj.u64("src_block")?,
            dest_block: obj.u64("dest_block")?,
            block_count: obj.u64("block_count")?,
        })
    }
}

impl WireEntity for Capabilities {
    const CLASS: &'static str = "Capabilities";

    fn to_value(&self) -> Value {
        ObjectBuilder::new(Self::CLASS)
            .field("cap", self.to_hex())
            .build()
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let obj = ObjectReader::open(value, Self::CLASS)?;
        let hex = obj.string("cap")?;
        Capabilities::from_hex(&hex).map_err(|e| DecodeError::from(e).in_field("cap"))
    }
}
