//! Coefficients et ancres des rampes de couleurs publiées
//!
//! Viridis, Plasma, Inferno, Magma : ajustements polynomiaux de degré 6 des
//! rampes matplotlib (canaux dans [0, 1], coefficient constant en premier).
//! Cividis et Turbo : polynômes de degré 5 publiés avec ces rampes, ramenés de
//! [0, 255] à [0, 1]. Blues : classe 9 de la palette séquentielle ColorBrewer.

/// Coefficients `[r, g, b]` par puissance croissante de t
pub type Coefficients = &'static [[f64; 3]];

pub const VIRIDIS: Coefficients = &[
    [0.2777273272234177, 0.005407344544966578, 0.3340998053353061],
    [0.1050930431085774, 1.404613529898575, 1.384590162594685],
    [-0.3308618287255563, 0.214847559468213, 0.09509516302823659],
    [-4.634230498983486, -5.799100973351585, -19.33244095627987],
    [6.228269936347081, 14.17993336680509, 56.69055260068105],
    [4.776384997670288, -13.74514537774601, -65.35303263337234],
    [-5.435455855934631, 4.645852612178535, 26.3124352495832],
];

pub const PLASMA: Coefficients = &[
    [0.05873234392399702, 0.02333670892565664, 0.5433401826748754],
    [2.176514634195958, 0.2383834171260182, 0.7539604599784036],
    [-2.689460476458034, -7.455851135738909, 3.110799939717086],
    [6.130348345893603, 42.3461881477227, -28.51885465332158],
    [-11.10743619062271, -82.66631109428045, 60.13984767418263],
    [10.02306557647065, 71.41361770095349, -54.07218655560067],
    [-3.658713842777788, -22.93153465461149, 18.19190778539828],
];

pub const INFERNO: Coefficients = &[
    [0.0002189403691192265, 0.001651004631001012, -0.01948089843709184],
    [0.1065134194856116, 0.5639564367884091, 3.932712388889277],
    [11.60249308247187, -3.972853965665698, -15.9423941062914],
    [-41.70399613139459, 17.43639888205313, 44.35414519872813],
    [77.162935699427, -33.40235894210092, -81.80730925738993],
    [-71.31942824499214, 32.62606426397723, 73.20951985803202],
    [25.13112622477341, -12.24266895238567, -23.07032500287172],
];

pub const MAGMA: Coefficients = &[
    [-0.002136485053939582, -0.000749655052795221, -0.005386127855323933],
    [0.2516605407371642, 0.6775232436837668, 2.494026599312351],
    [8.353717279216625, -3.577719514958484, 0.3144679030132573],
    [-27.66873308576866, 14.26473078096533, -13.64921318813922],
    [52.17613981234068, -27.94360607168351, 12.94416944238394],
    [-50.76852536473588, 29.04658282127291, 4.23415299384598],
    [18.65570506591883, -11.48977351997711, -5.601961508734096],
];

pub const CIVIDIS: Coefficients = &[
    [-0.0178039216, 0.1274117647, 0.3185882353],
    [-0.1385882353, 0.6695294118, 1.734745098],
    [9.3401176471, 0.2071372549, -9.7350196078],
    [-25.108627451, -0.5155294118, 24.185254902],
    [27.5479215686, 0.6924705882, -25.9409411765],
    [-10.6296862745, -0.2641960784, 9.7085098039],
];

pub const TURBO: Coefficients = &[
    [0.1357254902, 0.0914117647, 0.1066666667],
    [4.597372549, 2.1856078431, 12.5925490196],
    [-42.3276862745, 4.8052156863, -60.1096862745],
    [130.5887058824, -14.0194509804, 109.0745098039],
    [-150.566627451, 4.2108627451, -88.5065882353],
    [58.1374509804, 2.774745098, 26.8182745098],
];

/// Blues (ColorBrewer, 9 classes)
pub const BLUES: &[&str] = &[
    "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6",
    "#4292c6", "#2171b5", "#08519c", "#08306b",
];
